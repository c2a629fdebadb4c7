//! Application state and dependency injection.

use snapper_scrape::ScrapeService;
use snapper_store::DocumentStore;

use crate::service::{Result, ServiceConfig};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    document_store: DocumentStore,
    scrape: ScrapeService,
}

impl ServiceState {
    /// Creates application state from already-constructed services.
    pub fn new(document_store: DocumentStore, scrape: ScrapeService) -> Self {
        Self {
            document_store,
            scrape,
        }
    }

    /// Initializes application state from configuration, connecting to all
    /// external services.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        let service_state = Self {
            document_store: config.connect_storage().await?,
            scrape: config.create_scrape_service()?,
        };

        Ok(service_state)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+ $(,)?) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(document_store: DocumentStore);
impl_di!(scrape: ScrapeService);
