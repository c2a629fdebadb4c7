//! App [`state`] configuration.
//!
//! [`state`]: crate::service::ServiceState

use serde::{Deserialize, Serialize};
use snapper_opendal::{StorageBackend, StorageConfig};
use snapper_scrape::{ScrapeClient, ScrapeConfig, ScrapeService};
use snapper_store::DocumentStore;

use crate::service::{Result, ServiceError};

/// Configuration of the external collaborators: the object store holding
/// documents and the scraping API forwarding target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Object storage configuration.
    pub storage: StorageConfig,

    /// Scrape forwarding configuration.
    pub scrape: ScrapeConfig,
}

impl ServiceConfig {
    /// Creates a new configuration from its parts.
    pub fn new(storage: StorageConfig, scrape: ScrapeConfig) -> Self {
        Self { storage, scrape }
    }

    /// Connects the document store to the configured storage backend.
    pub async fn connect_storage(&self) -> Result<DocumentStore> {
        let backend = StorageBackend::new(self.storage.clone())
            .await
            .map_err(|e| {
                ServiceError::external("storage", "Failed to initialize storage backend")
                    .with_source(e)
            })?;

        Ok(DocumentStore::new(backend))
    }

    /// Creates the scrape forwarding service.
    pub fn create_scrape_service(&self) -> Result<ScrapeService> {
        let client = ScrapeClient::new(self.scrape.clone()).map_err(|e| {
            ServiceError::config("Failed to create scrape client").with_source(e)
        })?;

        Ok(client.into_service())
    }
}

#[cfg(debug_assertions)]
impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::memory(),
            scrape: ScrapeConfig::default(),
        }
    }
}
