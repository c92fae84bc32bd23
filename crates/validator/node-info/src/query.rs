//! Log queries over a [`NodeInfo`].

use crate::{LogResponse, NodeInfo};
use alloc::vec::Vec;
use alloy_primitives::{Address, B256, Log, map::HashSet};
use alloy_rpc_types_eth::Filter;

/// Whether the log address matches the address filter.
///
/// An empty filter matches every address.
pub fn matches_address_filter(log_address: &Address, addresses: &HashSet<Address>) -> bool {
    addresses.is_empty() || addresses.contains(log_address)
}

/// Whether the log topics match the topics filter.
///
/// Position `k` of the filter constrains the `k`-th topic of the log; an empty set at a position
/// matches any topic. A log with fewer topics than the filter has positions never matches.
pub fn matches_topics_filter(log_topics: &[B256], topics: &[HashSet<B256>]) -> bool {
    if topics.len() > log_topics.len() {
        return false;
    }

    topics
        .iter()
        .zip(log_topics)
        .all(|(allowed, topic)| allowed.is_empty() || allowed.contains(topic))
}

/// An address and topics filter over EVM logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    /// Addresses a log may be emitted by. Empty matches any address.
    pub addresses: HashSet<Address>,
    /// Allowed topics per topic position. An empty set matches any topic.
    pub topics: Vec<HashSet<B256>>,
}

impl LogQuery {
    /// Creates a new [`LogQuery`].
    pub const fn new(addresses: HashSet<Address>, topics: Vec<HashSet<B256>>) -> Self {
        Self { addresses, topics }
    }

    /// Returns `true` if the log matches the query.
    pub fn matches(&self, log: &Log) -> bool {
        matches_address_filter(&log.address, &self.addresses) &&
            matches_topics_filter(log.topics(), &self.topics)
    }
}

impl From<&Filter> for LogQuery {
    /// Builds a query from the address and topics of an RPC filter. The block range of the
    /// filter is ignored.
    ///
    /// Trailing wildcard positions are dropped so that a filter on the first topic only still
    /// matches logs with a single topic.
    fn from(filter: &Filter) -> Self {
        let addresses = filter.address.iter().copied().collect();
        let mut topics: Vec<HashSet<B256>> =
            filter.topics.iter().map(|topic| topic.iter().copied().collect()).collect();
        while topics.last().is_some_and(|topic| topic.is_empty()) {
            topics.pop();
        }
        Self { addresses, topics }
    }
}

impl NodeInfo {
    /// Returns every log of the node emitted by one of `addresses` whose topics match `topics`.
    ///
    /// Logs are returned in encounter order: group by group, and in emission order within a
    /// group. No deduplication or sorting is applied.
    pub fn find_logs(
        &self,
        addresses: &HashSet<Address>,
        topics: &[HashSet<B256>],
    ) -> Vec<LogResponse> {
        self.evm_tx_groups
            .iter()
            .flat_map(|group| group.logs.iter().map(move |log| (group, log)))
            .filter(|(_, log)| {
                matches_address_filter(&log.address, addresses) &&
                    matches_topics_filter(log.topics(), topics)
            })
            .map(|(group, log)| LogResponse {
                log: log.clone(),
                tx_index: group.tx_index,
                tx_hash: group.tx_hash,
            })
            .collect()
    }

    /// Returns every log of the node matching `query`.
    ///
    /// See [`NodeInfo::find_logs`].
    pub fn query_logs(&self, query: &LogQuery) -> Vec<LogResponse> {
        self.find_logs(&query.addresses, &query.topics)
    }
}
