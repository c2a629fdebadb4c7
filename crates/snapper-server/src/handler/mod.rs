//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod embeddings;
mod error;
mod monitors;
mod scrape;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::service::ServiceState;

#[inline]
async fn fallback() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all API routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .merge(embeddings::routes())
        .merge(scrape::routes())
        .merge(monitors::routes())
        .fallback(fallback)
}

#[cfg(test)]
pub(crate) mod test {
    use axum_test::TestServer;
    use snapper_opendal::{StorageBackend, StorageConfig};
    use snapper_scrape::{ScrapeProvider, ScrapeService};
    use snapper_store::DocumentStore;

    use crate::handler::routes;
    use crate::service::ServiceState;

    /// Stub upstream used instead of the reqwest client in handler tests.
    pub struct StubScrapeProvider {
        pub response: snapper_scrape::Result<serde_json::Value>,
    }

    impl StubScrapeProvider {
        pub fn replying(response: serde_json::Value) -> Self {
            Self {
                response: Ok(response),
            }
        }

        pub fn failing(error: snapper_scrape::Error) -> Self {
            Self {
                response: Err(error),
            }
        }
    }

    #[async_trait::async_trait]
    impl ScrapeProvider for StubScrapeProvider {
        async fn forward(
            &self,
            _body: &serde_json::Value,
        ) -> snapper_scrape::Result<serde_json::Value> {
            match &self.response {
                Ok(value) => Ok(value.clone()),
                Err(err) => Err(snapper_scrape::Error::new(err.kind)
                    .with_message(err.message.clone().unwrap_or_default())),
            }
        }
    }

    /// Returns a state backed by a fresh in-memory store and the given
    /// scrape provider.
    pub async fn create_test_state(provider: StubScrapeProvider) -> anyhow::Result<ServiceState> {
        let backend = StorageBackend::new(StorageConfig::memory()).await?;
        Ok(ServiceState::new(
            DocumentStore::new(backend),
            ScrapeService::new(provider),
        ))
    }

    /// Returns a new [`TestServer`] over all routes with the given state.
    pub fn create_test_server(state: ServiceState) -> anyhow::Result<TestServer> {
        let app = routes().with_state(state);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] with default test state.
    pub async fn create_default_test_server() -> anyhow::Result<TestServer> {
        let state = create_test_state(StubScrapeProvider::replying(serde_json::json!({}))).await?;
        create_test_server(state)
    }

    #[tokio::test]
    async fn unknown_routes_fall_back_to_not_found() -> anyhow::Result<()> {
        let server = create_default_test_server().await?;

        let response = server.post("/unknown").await;
        response.assert_status_not_found();

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["success"], serde_json::json!(false));
        Ok(())
    }
}
