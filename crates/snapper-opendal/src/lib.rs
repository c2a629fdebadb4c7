#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod backend;
mod config;
mod error;

pub use backend::StorageBackend;
pub use config::{BackendKind, StorageConfig, DEFAULT_CONTAINER, DEFAULT_REGION};
pub use error::{StorageError, StorageResult};

/// Tracing target for storage operations.
pub const TRACING_TARGET: &str = "snapper_opendal";
