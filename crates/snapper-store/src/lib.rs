#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod outcome;
mod store;

pub use error::{StoreError, StoreResult};
pub use outcome::{DeleteOutcome, RetrieveOutcome, SaveOutcome};
pub use store::DocumentStore;

/// Tracing target for document store operations.
pub const TRACING_TARGET: &str = "snapper_store";
