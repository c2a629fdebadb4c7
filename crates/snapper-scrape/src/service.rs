//! Provider-agnostic scrape service wrapper.

use std::sync::Arc;

use serde_json::Value;

use crate::{Result, ScrapeProvider};

/// Cloneable handle around a [`ScrapeProvider`] implementation.
///
/// Used for dependency injection into the HTTP layer; handler tests swap
/// the reqwest client for a stub through this type.
#[derive(Clone)]
pub struct ScrapeService {
    provider: Arc<dyn ScrapeProvider>,
}

impl ScrapeService {
    /// Creates a new service from any provider implementation.
    pub fn new(provider: impl ScrapeProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Forwards the request body through the underlying provider.
    pub async fn forward(&self, body: &Value) -> Result<Value> {
        self.provider.forward(body).await
    }
}

impl std::fmt::Debug for ScrapeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrapeService").finish_non_exhaustive()
    }
}
