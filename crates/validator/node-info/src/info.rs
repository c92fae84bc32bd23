//! The derived record of a dispute node.

use alloc::vec::Vec;
use alloy_primitives::{B256, Log};
use arb_avm::AvmValue;

/// The EVM logs of one decoded transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LogGroup {
    /// Logs emitted by the transaction, in emission order.
    pub logs: Vec<Log>,
    /// Index of the raw AVM log the transaction was decoded from.
    pub tx_index: u64,
    /// The EVM transaction hash.
    pub tx_hash: B256,
}

/// A log matched by a query, along with the transaction that emitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LogResponse {
    /// The matched log.
    pub log: Log,
    /// Index of the raw AVM log of the emitting transaction.
    pub tx_index: u64,
    /// Hash of the emitting transaction.
    pub tx_hash: B256,
}

/// Everything derived from a single dispute node.
///
/// A [`NodeInfo`] is created once by the [`NodeDeriver`] and never modified. Nodes that do not
/// carry a valid assertion keep their identity (`node_hash`, `node_height`, `l1_tx_hash`) but
/// have every log and message field empty.
///
/// The following always holds:
/// - `log_val_hashes`, `log_acc_hashes` and `raw_logs` have the same length;
/// - `log_acc_hashes[i] == accumulate(log_acc_hashes[i - 1], log_val_hashes[i])`, starting from
///   the zero hash;
/// - `evm_tx_groups` and `evm_tx_hashes` have the same length, at most the length of `raw_logs`.
///
/// [`NodeDeriver`]: crate::NodeDeriver
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct NodeInfo {
    pub(crate) node_hash: B256,
    pub(crate) node_height: u64,
    pub(crate) l1_tx_hash: B256,
    pub(crate) raw_logs: Vec<AvmValue>,
    pub(crate) raw_messages: Vec<AvmValue>,
    pub(crate) log_val_hashes: Vec<B256>,
    pub(crate) log_acc_hashes: Vec<B256>,
    pub(crate) evm_tx_groups: Vec<LogGroup>,
    pub(crate) evm_tx_hashes: Vec<B256>,
}

impl NodeInfo {
    /// Creates a record carrying only the identity of a node.
    pub(crate) const fn new(node_hash: B256, node_height: u64, l1_tx_hash: B256) -> Self {
        Self {
            node_hash,
            node_height,
            l1_tx_hash,
            raw_logs: Vec::new(),
            raw_messages: Vec::new(),
            log_val_hashes: Vec::new(),
            log_acc_hashes: Vec::new(),
            evm_tx_groups: Vec::new(),
            evm_tx_hashes: Vec::new(),
        }
    }

    /// The content hash of the node.
    pub const fn node_hash(&self) -> B256 {
        self.node_hash
    }

    /// The height of the node in the dispute tree.
    pub const fn node_height(&self) -> u64 {
        self.node_height
    }

    /// Hash of the L1 transaction that created the node.
    pub const fn l1_tx_hash(&self) -> B256 {
        self.l1_tx_hash
    }

    /// The raw AVM logs of the node's assertion.
    pub fn raw_logs(&self) -> &[AvmValue] {
        &self.raw_logs
    }

    /// The raw outgoing messages of the node's assertion.
    pub fn raw_messages(&self) -> &[AvmValue] {
        &self.raw_messages
    }

    /// The value hash of every raw log, in assertion order.
    pub fn log_val_hashes(&self) -> &[B256] {
        &self.log_val_hashes
    }

    /// The accumulator after every raw log, in assertion order.
    pub fn log_acc_hashes(&self) -> &[B256] {
        &self.log_acc_hashes
    }

    /// The logs of every successfully decoded raw log, in assertion order.
    pub fn evm_tx_groups(&self) -> &[LogGroup] {
        &self.evm_tx_groups
    }

    /// The transaction hash of every successfully decoded raw log, aligned with
    /// [`NodeInfo::evm_tx_groups`].
    pub fn evm_tx_hashes(&self) -> &[B256] {
        &self.evm_tx_hashes
    }

    /// Returns `true` if both records are equal field by field.
    ///
    /// Sequences are compared in order, so the same logs in a different order are not equal.
    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }
}
