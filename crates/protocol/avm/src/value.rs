//! Raw AVM values and the assertion payload carried by a dispute node.

use alloc::vec::Vec;
use alloy_primitives::Bytes;
use derive_more::{AsRef, Constructor, From};

/// An opaque, serialized AVM value.
///
/// The validator never interprets the contents of an [`AvmValue`]. It only hashes it (see
/// [`LogHasher::value_hash`]) and hands it to a [`LogDecoder`] for EVM decoding.
///
/// [`LogHasher::value_hash`]: crate::LogHasher::value_hash
/// [`LogDecoder`]: crate::LogDecoder
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, From, AsRef)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvmValue(Bytes);

impl AvmValue {
    /// Wraps the serialized form of a value.
    pub const fn new(bytes: Bytes) -> Self {
        Self(bytes)
    }

    /// Returns the serialized form of the value.
    pub const fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    /// Consumes the value, returning its serialized form.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl From<Vec<u8>> for AvmValue {
    fn from(data: Vec<u8>) -> Self {
        Self(Bytes::from(data))
    }
}

impl AsRef<[u8]> for AvmValue {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

/// The execution output claimed by a dispute node.
///
/// `logs[i]` is the log of the `i`-th transaction executed within the node. Outgoing messages are
/// carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Constructor)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Assertion {
    /// Messages sent out of the VM, in emission order.
    pub out_msgs: Vec<AvmValue>,
    /// Raw logs, one per executed transaction, in execution order.
    pub logs: Vec<AvmValue>,
}
