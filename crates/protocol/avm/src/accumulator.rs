//! The log accumulator.
//!
//! Every raw log of a node is hashed, and the hashes are folded into a running accumulator:
//!
//! ```text
//! acc[-1] = 0x00..00
//! acc[i]  = keccak256(acc[i - 1] ++ value_hash[i])
//! ```
//!
//! The concatenation is the packed encoding of two `bytes32` words, exactly 64 bytes with no
//! length prefix, which is what the on-chain verifier computes with
//! `keccak256(abi.encodePacked(acc, valueHash))`.

use crate::AvmValue;
use alloy_primitives::{B256, keccak256};
use auto_impl::auto_impl;

/// Folds `value_hash` into the accumulator `acc`.
pub fn accumulate(acc: B256, value_hash: B256) -> B256 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(acc.as_slice());
    buf[32..].copy_from_slice(value_hash.as_slice());
    keccak256(buf)
}

/// Hashing capability used to build and replay the log accumulator.
#[auto_impl(&)]
pub trait LogHasher {
    /// Computes the value hash of a raw AVM log.
    fn value_hash(&self, value: &AvmValue) -> B256;

    /// Folds a value hash into the running accumulator.
    fn accumulate(&self, acc: B256, value_hash: B256) -> B256 {
        accumulate(acc, value_hash)
    }
}

/// The default [`LogHasher`]: keccak256 over the serialized value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeccakLogHasher;

impl LogHasher for KeccakLogHasher {
    fn value_hash(&self, value: &AvmValue) -> B256 {
        keccak256(value.as_bytes())
    }
}
