#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;
mod service;

pub use client::ScrapeClient;
pub use config::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, ScrapeConfig};
pub use service::ScrapeService;
pub use snapper_core::{Error, ErrorKind, Result};

/// Tracing target for scrape forwarding operations.
pub const TRACING_TARGET: &str = "snapper_scrape";

/// Core trait for scrape forwarding operations.
///
/// Implement this trait to substitute the upstream, e.g. with a stub in
/// handler tests.
#[async_trait::async_trait]
pub trait ScrapeProvider: Send + Sync {
    /// Forwards the request body unmodified and returns the upstream's
    /// JSON response unmodified.
    async fn forward(&self, body: &serde_json::Value) -> Result<serde_json::Value>;
}
