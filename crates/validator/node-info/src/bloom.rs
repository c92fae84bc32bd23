//! Logs bloom of a [`NodeInfo`].

use crate::NodeInfo;
use alloc::vec::Vec;
use alloy_primitives::Bloom;
use alloy_rpc_types_eth::Log as RpcLog;

impl NodeInfo {
    /// Returns every decoded log of the node in its externally-shaped form.
    ///
    /// The node stands in for the block: its hash and height are used as block hash and block
    /// number. Each log is tagged with the raw-log index and hash of its transaction, and with a
    /// log index that increases across the whole node rather than per transaction.
    pub fn rpc_logs(&self) -> Vec<RpcLog> {
        self.evm_tx_groups
            .iter()
            .flat_map(|group| group.logs.iter().map(move |log| (group, log)))
            .zip(0u64..)
            .map(|((group, log), log_index)| RpcLog {
                inner: log.clone(),
                block_hash: Some(self.node_hash),
                block_number: Some(self.node_height),
                block_timestamp: None,
                transaction_hash: Some(group.tx_hash),
                transaction_index: Some(group.tx_index),
                log_index: Some(log_index),
                removed: false,
            })
            .collect()
    }

    /// Computes the 2048-bit logs bloom over every decoded log of the node.
    ///
    /// A node without decoded logs has an all-zero bloom.
    pub fn bloom(&self) -> Bloom {
        self.rpc_logs().iter().fold(Bloom::ZERO, |mut bloom, log| {
            bloom.accrue_log(&log.inner);
            bloom
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogGroup;
    use alloy_primitives::{Address, B256, BloomInput, Bytes, Log};
    use rstest::{fixture, rstest};

    const A: Address = Address::repeat_byte(0x0a);
    const B: Address = Address::repeat_byte(0x0b);
    const T1: B256 = B256::repeat_byte(0x01);
    const T2: B256 = B256::repeat_byte(0x02);

    fn log(address: Address, topics: Vec<B256>) -> Log {
        Log::new_unchecked(address, topics, Bytes::from_static(b"data"))
    }

    #[fixture]
    fn info() -> NodeInfo {
        NodeInfo {
            evm_tx_groups: vec![
                LogGroup {
                    logs: vec![log(A, vec![T1]), log(A, vec![])],
                    tx_index: 0,
                    tx_hash: B256::repeat_byte(0x10),
                },
                LogGroup { logs: vec![], tx_index: 1, tx_hash: B256::repeat_byte(0x11) },
                LogGroup {
                    logs: vec![log(B, vec![T1, T2])],
                    tx_index: 3,
                    tx_hash: B256::repeat_byte(0x13),
                },
            ],
            ..NodeInfo::new(B256::repeat_byte(0xff), 9, B256::ZERO)
        }
    }

    #[test]
    fn test_empty_node_has_zero_bloom() {
        assert_eq!(NodeInfo::default().bloom(), Bloom::ZERO);
    }

    #[rstest]
    fn test_bloom_contains_addresses_and_topics(info: NodeInfo) {
        let bloom = info.bloom();
        assert!(bloom.contains_input(BloomInput::Raw(A.as_slice())));
        assert!(bloom.contains_input(BloomInput::Raw(B.as_slice())));
        assert!(bloom.contains_input(BloomInput::Raw(T1.as_slice())));
        assert!(bloom.contains_input(BloomInput::Raw(T2.as_slice())));
    }

    #[rstest]
    fn test_bloom_matches_accrued_logs(info: NodeInfo) {
        let mut expected = Bloom::ZERO;
        for log in info.evm_tx_groups().iter().flat_map(|group| group.logs.iter()) {
            expected.accrue_log(log);
        }
        assert_eq!(info.bloom(), expected);
    }

    #[rstest]
    fn test_bloom_ignores_group_provenance(info: NodeInfo) {
        let mut other = info.clone();
        for group in &mut other.evm_tx_groups {
            group.tx_hash = B256::ZERO;
            group.tx_index += 100;
        }
        other.node_hash = B256::ZERO;
        assert_eq!(info.bloom(), other.bloom());
    }

    #[rstest]
    fn test_rpc_logs_use_global_log_index(info: NodeInfo) {
        let logs = info.rpc_logs();
        assert_eq!(logs.len(), 3);

        let log_indices: Vec<_> = logs.iter().map(|log| log.log_index).collect();
        assert_eq!(log_indices, vec![Some(0), Some(1), Some(2)]);

        let tx_indices: Vec<_> = logs.iter().map(|log| log.transaction_index).collect();
        assert_eq!(tx_indices, vec![Some(0), Some(0), Some(3)]);

        assert_eq!(logs[2].transaction_hash, Some(B256::repeat_byte(0x13)));
        assert!(logs.iter().all(|log| log.block_hash == Some(B256::repeat_byte(0xff))));
        assert!(logs.iter().all(|log| log.block_number == Some(9)));
        assert!(logs.iter().all(|log| !log.removed));
    }
}
