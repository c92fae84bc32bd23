#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod value;
pub use value::{Assertion, AvmValue};

mod node;
pub use node::{DisputeNode, LinkType};

mod execution;
pub use execution::{DecodedExecution, ExecutedMessage, LogDecoder};

mod accumulator;
pub use accumulator::{KeccakLogHasher, LogHasher, accumulate};

#[cfg(any(test, feature = "test-utils"))]
mod test_util;
#[cfg(any(test, feature = "test-utils"))]
pub use test_util::{
    DisputeNodeBuilder, MockDecodeError, MockDisputeNode, ScriptedDecoder, evm_log, raw_value,
};
