//! Read-only view of a vertex in the dispute tree.

use crate::Assertion;
use alloy_primitives::B256;
use auto_impl::auto_impl;
use derive_more::TryFrom;

/// How a dispute node relates to its parent.
///
/// Every child of a node is one possible outcome of the parent's pending assertion. Only
/// [`LinkType::Valid`] children carry the assertion's execution output; the other variants are
/// branches that claim the assertion was invalid and therefore carry identity only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, TryFrom)]
#[try_from(repr)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum LinkType {
    /// The parent's assertion was challenged before its inbox messages were pending.
    InvalidPending = 0,
    /// The parent's assertion consumed the wrong inbox messages.
    InvalidMessages = 1,
    /// The parent's assertion executed incorrectly.
    InvalidExecution = 2,
    /// The parent's assertion is valid and its output is attached.
    Valid = 3,
}

impl LinkType {
    /// Returns `true` if the node resulted from a valid assertion execution.
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// A vertex in the rollup's on-chain dispute tree.
///
/// Implementations are snapshots: every method must return the same value for the lifetime of
/// the borrow.
#[auto_impl(&)]
pub trait DisputeNode {
    /// The content hash identifying the node.
    fn hash(&self) -> B256;

    /// The height of the node in the dispute tree.
    fn depth(&self) -> u64;

    /// How the node relates to its parent.
    fn link_type(&self) -> LinkType;

    /// Hash of the L1 transaction that created the node.
    fn assertion_tx_hash(&self) -> B256;

    /// The assertion attached to the node.
    ///
    /// Only meaningful when [`DisputeNode::link_type`] is [`LinkType::Valid`]. Callers must not
    /// consult it for any other link type, and implementations may return [`None`] there.
    fn assertion(&self) -> Option<&Assertion>;
}
