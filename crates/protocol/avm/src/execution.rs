//! The log decoding contract between raw AVM logs and EVM-shaped execution results.

use crate::AvmValue;
use alloc::vec::Vec;
use alloy_primitives::{Address, B256, Bytes, Log};
use auto_impl::auto_impl;
use derive_more::Constructor;

/// The EVM transaction a raw AVM log was produced by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Constructor)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ExecutedMessage {
    /// The account that sent the transaction.
    pub sender: Address,
    /// The EVM transaction hash derived for the message.
    pub tx_hash: B256,
}

impl ExecutedMessage {
    /// Returns the EVM transaction hash of the message.
    pub const fn tx_hash(&self) -> B256 {
        self.tx_hash
    }
}

/// The outcome of decoding a single raw AVM log.
///
/// A revert is a valid EVM outcome: it carries a transaction hash like any other execution, but
/// no logs, since reverted executions discard the logs they emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "camelCase"))]
pub enum DecodedExecution {
    /// The transaction ran to completion.
    Success {
        /// The transaction that was executed.
        message: ExecutedMessage,
        /// Logs emitted by the transaction, in emission order.
        logs: Vec<Log>,
        /// Data returned by the transaction.
        output: Bytes,
    },
    /// The transaction reverted.
    Revert {
        /// The transaction that was executed.
        message: ExecutedMessage,
        /// The revert payload returned by the transaction.
        payload: Bytes,
    },
}

impl DecodedExecution {
    /// Returns the transaction that produced this result.
    pub const fn message(&self) -> &ExecutedMessage {
        match self {
            Self::Success { message, .. } | Self::Revert { message, .. } => message,
        }
    }

    /// Returns the logs emitted by the transaction.
    pub fn logs(&self) -> &[Log] {
        match self {
            Self::Success { logs, .. } => logs,
            Self::Revert { .. } => &[],
        }
    }

    /// Consumes the result, returning the logs emitted by the transaction.
    pub fn into_logs(self) -> Vec<Log> {
        match self {
            Self::Success { logs, .. } => logs,
            Self::Revert { .. } => Vec::new(),
        }
    }

    /// Returns the revert payload if the transaction reverted.
    pub const fn revert_payload(&self) -> Option<&Bytes> {
        match self {
            Self::Revert { payload, .. } => Some(payload),
            Self::Success { .. } => None,
        }
    }
}

/// Converts raw AVM logs into EVM-shaped execution results.
///
/// Decoding is a pure function of its inputs. A failure only concerns the single log passed in.
#[auto_impl(&)]
pub trait LogDecoder {
    /// The error returned when a raw log cannot be decoded.
    type Error: core::error::Error;

    /// Decodes one raw AVM log emitted by the rollup chain deployed at `chain_address`.
    fn decode(
        &self,
        raw_log: &AvmValue,
        chain_address: Address,
    ) -> Result<DecodedExecution, Self::Error>;
}
