#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod config;
pub use config::DeriverConfig;

mod error;
pub use error::NodeInfoError;

mod info;
pub use info::{LogGroup, LogResponse, NodeInfo};

mod deriver;
pub use deriver::NodeDeriver;

mod query;
pub use query::{LogQuery, matches_address_filter, matches_topics_filter};

mod bloom;

mod tx;
pub use tx::TxInfo;
