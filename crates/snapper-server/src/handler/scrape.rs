//! Pass-through handler for the profile scraping API.

use axum::Router;
use axum::extract::State;
use axum::routing::post;
use serde_json::Value;
use snapper_scrape::ScrapeService;

use crate::extract::Json;
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for scrape operations.
const TRACING_TARGET: &str = "snapper_server::handler::scrape";

/// Forwards the request body unmodified and relays the upstream response.
#[tracing::instrument(skip_all)]
async fn scrape_linkedin(
    State(scrape): State<ScrapeService>,
    request: Option<Json<Value>>,
) -> Result<Json<Value>> {
    let Some(Json(body)) = request else {
        return Err(ErrorKind::BadRequest.with_message("No request body"));
    };

    tracing::info!(
        target: TRACING_TARGET,
        "forwarding scrape request",
    );

    let response = scrape.forward(&body).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        "relaying scrape response",
    );

    Ok(Json(response))
}

/// Returns a [`Router`] with the scrape route.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/scrape-linkedin", post(scrape_linkedin))
}
