//! HTTP middleware layers: CORS, request tracing, and recovery.

mod cors;
mod observability;
mod recovery;

pub use cors::{CorsConfig, create_cors_layer};
pub use observability::RouterObservabilityExt;
pub use recovery::RouterRecoveryExt;

use axum::Router;

/// Extension trait applying the security-related layers to a router.
pub trait RouterSecurityExt {
    /// Applies the CORS layer built from the given configuration.
    #[must_use]
    fn with_security(self, cors: &CorsConfig) -> Self;
}

impl RouterSecurityExt for Router {
    fn with_security(self, cors: &CorsConfig) -> Self {
        self.layer(create_cors_layer(cors))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, Method, header};
    use axum_test::TestServer;

    use super::*;
    use crate::handler;
    use crate::handler::test::{StubScrapeProvider, create_test_state};

    async fn create_cors_test_server() -> anyhow::Result<TestServer> {
        let state = create_test_state(StubScrapeProvider::replying(serde_json::json!({}))).await?;
        let app = handler::routes().with_state(state).with_security(&CorsConfig::default());
        Ok(TestServer::new(app)?)
    }

    #[tokio::test]
    async fn preflight_gets_permissive_headers() -> anyhow::Result<()> {
        let server = create_cors_test_server().await?;

        let response = server
            .method(Method::OPTIONS, "/save-embeddings")
            .add_header(header::ORIGIN, HeaderValue::from_static("https://example.com"))
            .add_header(
                header::ACCESS_CONTROL_REQUEST_METHOD,
                HeaderValue::from_static("POST"),
            )
            .await;

        response.assert_status_success();
        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            HeaderValue::from_static("*")
        );
        Ok(())
    }

    #[tokio::test]
    async fn simple_requests_carry_allow_origin() -> anyhow::Result<()> {
        let server = create_cors_test_server().await?;

        let response = server
            .post("/health")
            .add_header(header::ORIGIN, HeaderValue::from_static("https://example.com"))
            .await;

        response.assert_status_success();
        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            HeaderValue::from_static("*")
        );
        Ok(())
    }
}
