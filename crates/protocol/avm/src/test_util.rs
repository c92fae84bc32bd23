//! Test utilities for `arb-avm`.

#![allow(missing_docs, unreachable_pub, unused)]

use crate::{
    Assertion, AvmValue, DecodedExecution, DisputeNode, ExecutedMessage, LinkType, LogDecoder,
};
use alloc::{string::String, vec::Vec};
use alloy_primitives::{Address, B256, Bytes, Log};

/// Builds an [`AvmValue`] from a human readable tag.
pub fn raw_value(tag: &str) -> AvmValue {
    AvmValue::from(tag.as_bytes().to_vec())
}

/// Builds an EVM log with the given address, topics and data.
pub fn evm_log(address: Address, topics: Vec<B256>, data: &'static [u8]) -> Log {
    Log::new_unchecked(address, topics, Bytes::from_static(data))
}

/// An in-memory [`DisputeNode`] snapshot.
///
/// The assertion is stored regardless of the link type, so tests can check that consumers do
/// not look at it for non-valid nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockDisputeNode {
    pub hash: B256,
    pub depth: u64,
    pub link_type: LinkType,
    pub assertion_tx_hash: B256,
    pub assertion: Option<Assertion>,
}

impl DisputeNode for MockDisputeNode {
    fn hash(&self) -> B256 {
        self.hash
    }

    fn depth(&self) -> u64 {
        self.depth
    }

    fn link_type(&self) -> LinkType {
        self.link_type
    }

    fn assertion_tx_hash(&self) -> B256 {
        self.assertion_tx_hash
    }

    fn assertion(&self) -> Option<&Assertion> {
        self.assertion.as_ref()
    }
}

#[derive(Debug)]
pub struct DisputeNodeBuilder {
    hash: B256,
    depth: u64,
    link_type: LinkType,
    assertion_tx_hash: B256,
    logs: Vec<AvmValue>,
    out_msgs: Vec<AvmValue>,
}

impl Default for DisputeNodeBuilder {
    fn default() -> Self {
        Self {
            hash: B256::repeat_byte(0x01),
            depth: 1,
            link_type: LinkType::Valid,
            assertion_tx_hash: B256::repeat_byte(0x02),
            logs: Vec::new(),
            out_msgs: Vec::new(),
        }
    }
}

impl DisputeNodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_hash(mut self, hash: B256) -> Self {
        self.hash = hash;
        self
    }

    pub const fn with_depth(mut self, depth: u64) -> Self {
        self.depth = depth;
        self
    }

    pub const fn with_link_type(mut self, link_type: LinkType) -> Self {
        self.link_type = link_type;
        self
    }

    pub const fn with_assertion_tx_hash(mut self, tx_hash: B256) -> Self {
        self.assertion_tx_hash = tx_hash;
        self
    }

    pub fn add_log(mut self, log: AvmValue) -> Self {
        self.logs.push(log);
        self
    }

    pub fn add_message(mut self, msg: AvmValue) -> Self {
        self.out_msgs.push(msg);
        self
    }

    pub fn build(self) -> MockDisputeNode {
        MockDisputeNode {
            hash: self.hash,
            depth: self.depth,
            link_type: self.link_type,
            assertion_tx_hash: self.assertion_tx_hash,
            assertion: Some(Assertion::new(self.out_msgs, self.logs)),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MockDecodeError {
    #[error("malformed AVM log")]
    Malformed,
    #[error("no scripted result for AVM log")]
    Unscripted,
}

/// A [`LogDecoder`] returning pre-scripted results keyed by raw log.
///
/// Raw logs without a scripted result fail with [`MockDecodeError::Unscripted`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecoder {
    results: Vec<(AvmValue, Result<DecodedExecution, MockDecodeError>)>,
}

impl ScriptedDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn succeed(mut self, raw_log: AvmValue, tx_hash: B256, logs: Vec<Log>) -> Self {
        let message = ExecutedMessage::new(Address::repeat_byte(0xee), tx_hash);
        self.results.push((
            raw_log,
            Ok(DecodedExecution::Success { message, logs, output: Bytes::new() }),
        ));
        self
    }

    pub fn revert(mut self, raw_log: AvmValue, tx_hash: B256, payload: &'static [u8]) -> Self {
        let message = ExecutedMessage::new(Address::repeat_byte(0xee), tx_hash);
        self.results.push((
            raw_log,
            Ok(DecodedExecution::Revert { message, payload: Bytes::from_static(payload) }),
        ));
        self
    }

    pub fn fail(mut self, raw_log: AvmValue) -> Self {
        self.results.push((raw_log, Err(MockDecodeError::Malformed)));
        self
    }
}

impl LogDecoder for ScriptedDecoder {
    type Error = MockDecodeError;

    fn decode(
        &self,
        raw_log: &AvmValue,
        _chain_address: Address,
    ) -> Result<DecodedExecution, Self::Error> {
        self.results
            .iter()
            .find(|(value, _)| value == raw_log)
            .map_or(Err(MockDecodeError::Unscripted), |(_, result)| result.clone())
    }
}
