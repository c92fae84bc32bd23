//! Configuration of the [`NodeDeriver`](crate::NodeDeriver).

use alloy_primitives::Address;
use derive_more::Constructor;

/// Static configuration for deriving [`NodeInfo`](crate::NodeInfo)s of one rollup chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Constructor)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DeriverConfig {
    /// The L1 address of the rollup chain contract.
    ///
    /// Passed to the log decoder to resolve the identity of contracts on the rollup.
    pub chain_address: Address,
}
