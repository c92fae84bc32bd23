//! Transaction views over a [`NodeInfo`].

use crate::{NodeInfo, NodeInfoError};
use alloc::vec::Vec;
use alloy_primitives::B256;
use arb_avm::{AvmValue, LogHasher};

/// The receipt-like view of one transaction within a node.
///
/// Besides the identity of the transaction and its node, the view carries the material needed
/// to prove that the transaction's raw log is part of the node's log accumulator: starting from
/// `logs_pre_hash`, folding in the value hash of `raw_val` followed by every hash of
/// `logs_val_hashes` yields `logs_post_hash`. See [`TxInfo::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TxInfo {
    /// Whether the transaction was found.
    pub found: bool,
    /// The height of the node containing the transaction.
    #[cfg_attr(feature = "serde", serde(with = "alloy_serde::quantity"))]
    pub node_height: u64,
    /// The hash of the node containing the transaction.
    pub node_hash: B256,
    /// The EVM transaction hash.
    pub transaction_hash: B256,
    /// The index of the transaction's raw log within the node.
    #[cfg_attr(feature = "serde", serde(with = "alloy_serde::quantity"))]
    pub transaction_index: u64,
    /// The raw AVM log of the transaction.
    pub raw_val: AvmValue,
    /// The accumulator over every raw log before this transaction's.
    pub logs_pre_hash: B256,
    /// The accumulator over every raw log of the node.
    pub logs_post_hash: B256,
    /// The value hashes of every raw log after this transaction's.
    pub logs_val_hashes: Vec<B256>,
    /// Hash of the L1 transaction that created the node.
    pub on_chain_tx_hash: B256,
}

impl TxInfo {
    /// Replays the log accumulator from `logs_pre_hash` and checks it ends at `logs_post_hash`.
    pub fn verify<H: LogHasher>(&self, hasher: &H) -> bool {
        let own_hash = hasher.value_hash(&self.raw_val);
        let acc = core::iter::once(own_hash)
            .chain(self.logs_val_hashes.iter().copied())
            .fold(self.logs_pre_hash, |acc, val_hash| hasher.accumulate(acc, val_hash));
        acc == self.logs_post_hash
    }
}

impl NodeInfo {
    /// Builds the [`TxInfo`] of the transaction whose raw log is at `tx_index`.
    ///
    /// `tx_index` is an index into [`NodeInfo::raw_logs`], i.e. the [`LogGroup::tx_index`] of
    /// the transaction, not its position in [`NodeInfo::evm_tx_groups`].
    ///
    /// Records that were not produced by the [`NodeDeriver`], e.g. deserialized ones, are checked
    /// for hash lists of the same length as the raw logs first.
    ///
    /// [`LogGroup::tx_index`]: crate::LogGroup::tx_index
    /// [`NodeDeriver`]: crate::NodeDeriver
    pub fn tx_info(&self, tx_hash: B256, tx_index: u64) -> Result<TxInfo, NodeInfoError> {
        let len = self.raw_logs.len();
        if self.log_val_hashes.len() != len || self.log_acc_hashes.len() != len {
            return Err(NodeInfoError::InconsistentHashes {
                raw_logs: len,
                val_hashes: self.log_val_hashes.len(),
                acc_hashes: self.log_acc_hashes.len(),
            });
        }

        let (index, raw_val) = usize::try_from(tx_index)
            .ok()
            .and_then(|index| self.raw_logs.get(index).map(|raw_val| (index, raw_val)))
            .ok_or(NodeInfoError::TxIndexOutOfBounds { index: tx_index, len })?;

        let logs_post_hash = self.log_acc_hashes.last().copied().unwrap_or(B256::ZERO);
        let logs_pre_hash = index
            .checked_sub(1)
            .and_then(|prev| self.log_acc_hashes.get(prev).copied())
            .unwrap_or(B256::ZERO);
        let logs_val_hashes =
            self.log_val_hashes.get(index + 1..).map(<[B256]>::to_vec).unwrap_or_default();

        Ok(TxInfo {
            found: true,
            node_height: self.node_height,
            node_hash: self.node_hash,
            transaction_hash: tx_hash,
            transaction_index: tx_index,
            raw_val: raw_val.clone(),
            logs_pre_hash,
            logs_post_hash,
            logs_val_hashes,
            on_chain_tx_hash: self.l1_tx_hash,
        })
    }

    /// Returns the raw-log index of the decoded transaction with hash `tx_hash`.
    pub fn tx_index_of(&self, tx_hash: B256) -> Option<u64> {
        self.evm_tx_groups.iter().find(|group| group.tx_hash == tx_hash).map(|group| group.tx_index)
    }

    /// Builds the [`TxInfo`] of the decoded transaction with hash `tx_hash`, if the node
    /// contains it.
    pub fn tx_info_by_hash(&self, tx_hash: B256) -> Option<TxInfo> {
        self.tx_index_of(tx_hash).and_then(|tx_index| self.tx_info(tx_hash, tx_index).ok())
    }
}
