//! Request tracing middleware.

use axum::Router;
use tower_http::trace::TraceLayer;

/// Extension trait applying the observability layers to a router.
pub trait RouterObservabilityExt {
    /// Applies HTTP request/response tracing spans.
    #[must_use]
    fn with_observability(self) -> Self;
}

impl RouterObservabilityExt for Router {
    fn with_observability(self) -> Self {
        self.layer(TraceLayer::new_for_http())
    }
}
