//! CORS (Cross-Origin Resource Sharing) middleware configuration.

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

/// Creates a CORS layer based on the provided configuration.
///
/// With no configured origins the layer is permissive (`*`). Preflight
/// OPTIONS requests are answered by this layer before any handler runs.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(config.max_age());

    if config.allowed_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(config.to_header_values())
    }
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(clap::Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// List of allowed CORS origins. If empty, any origin is allowed.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_ORIGINS", value_delimiter = ',')
    )]
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Maximum age for CORS preflight requests in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_MAX_AGE", default_value = "3600")
    )]
    #[serde(default = "default_max_age_seconds")]
    pub max_age_seconds: u64,
}

fn default_max_age_seconds() -> u64 {
    3600
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: default_max_age_seconds(),
        }
    }
}

impl CorsConfig {
    /// Returns the CORS max age as a Duration.
    #[must_use]
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Converts configured origins to a HeaderValue list.
    #[must_use]
    pub fn to_header_values(&self) -> Vec<HeaderValue> {
        self.allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_permissive() {
        let config = CorsConfig::default();
        assert!(config.allowed_origins.is_empty());
        assert_eq!(config.max_age(), Duration::from_secs(3600));

        let _layer = create_cors_layer(&config);
    }

    #[test]
    fn custom_origins_are_parsed() {
        let config = CorsConfig {
            allowed_origins: vec![
                "https://formsnapper.app".to_string(),
                "https://app.formsnapper.app".to_string(),
            ],
            ..Default::default()
        };

        assert_eq!(config.to_header_values().len(), 2);
        let _layer = create_cors_layer(&config);
    }

    #[test]
    fn invalid_origins_are_skipped() {
        let config = CorsConfig {
            allowed_origins: vec!["https://ok.example".to_string(), "\u{0}bad".to_string()],
            ..Default::default()
        };

        assert_eq!(config.to_header_values().len(), 1);
    }
}
