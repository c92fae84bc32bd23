//! Error types for the `arb-node-info` crate.

use thiserror::Error;

/// An error returned when querying a [`NodeInfo`](crate::NodeInfo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NodeInfoError {
    /// The transaction index does not refer to a raw log of the node.
    #[error("Transaction index {index} out of bounds for node with {len} raw logs")]
    TxIndexOutOfBounds {
        /// The requested transaction index.
        index: u64,
        /// The number of raw logs in the node.
        len: usize,
    },
    /// The hash lists of the record do not line up with its raw logs.
    #[error(
        "Inconsistent node record: {raw_logs} raw logs, {val_hashes} value hashes, {acc_hashes} accumulator hashes"
    )]
    InconsistentHashes {
        /// The number of raw logs in the node.
        raw_logs: usize,
        /// The number of value hashes in the node.
        val_hashes: usize,
        /// The number of accumulator hashes in the node.
        acc_hashes: usize,
    },
}
