//! System health monitoring handlers.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use serde::{Deserialize, Serialize};
use snapper_store::DocumentStore;

use crate::extract::Json;
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "snapper_server::handler::monitors";

/// Health status response.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HealthStatusResponse {
    /// Whether the storage backend responded to a probe.
    pub is_healthy: bool,
    /// When the status was computed.
    pub updated_at: jiff::Timestamp,
}

#[tracing::instrument(skip_all)]
async fn health_status(
    State(store): State<DocumentStore>,
) -> Result<(StatusCode, Json<HealthStatusResponse>)> {
    let is_healthy = store.health_check().await;

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        target: TRACING_TARGET,
        is_healthy,
        status_code = status_code.as_u16(),
        "health status response prepared"
    );

    Ok((
        status_code,
        Json(HealthStatusResponse {
            is_healthy,
            updated_at: jiff::Timestamp::now(),
        }),
    ))
}

/// Returns a [`Router`] with all health monitoring routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", post(health_status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test::create_default_test_server;

    #[tokio::test]
    async fn health_endpoint_reports_healthy() -> anyhow::Result<()> {
        let server = create_default_test_server().await?;

        let response = server.post("/health").await;
        response.assert_status_ok();

        let status = response.json::<HealthStatusResponse>();
        assert!(status.is_healthy);

        // Timestamp should be recent (within the last minute).
        let age = jiff::Timestamp::now() - status.updated_at;
        assert!(age.get_seconds() < 60);
        Ok(())
    }
}
