//! Request recovery middleware.

use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;

/// Extension trait applying the recovery layers to a router.
pub trait RouterRecoveryExt {
    /// Bounds request processing time; requests exceeding the timeout are
    /// terminated with 408 Request Timeout.
    #[must_use]
    fn with_recovery(self, request_timeout: Duration) -> Self;
}

impl RouterRecoveryExt for Router {
    fn with_recovery(self, request_timeout: Duration) -> Self {
        self.layer(TimeoutLayer::new(request_timeout))
    }
}
