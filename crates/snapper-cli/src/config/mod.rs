//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── server: ServerConfig    # Host, port, timeouts
//! ├── cors: CorsConfig        # Allowed origins, preflight max-age
//! ├── storage: StorageConfig  # Object store backend and container
//! └── scrape: ScrapeConfig    # Forwarding endpoint and timeout
//! ```
//!
//! All configuration can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.

mod server;

use std::process;

use clap::Parser;
use serde::{Deserialize, Serialize};
use snapper_server::middleware::CorsConfig;
use snapper_server::service::{ScrapeConfig, ServiceConfig, StorageConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use server::ServerConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "snapper")]
#[command(about = "Document embeddings storage server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// CORS middleware configuration.
    #[clap(flatten)]
    pub cors: CorsConfig,

    /// Object storage configuration.
    #[clap(flatten)]
    pub storage: StorageConfig,

    /// Scrape forwarding configuration.
    #[clap(flatten)]
    pub scrape: ScrapeConfig,
}

impl Cli {
    /// Loads environment variables from a .env file (if enabled) and
    /// parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from a .env file if the dotenv feature
    /// is enabled.
    ///
    /// This runs before parsing so that clap's `env` attributes can pick
    /// up values from the file.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when the dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server.validate()
    }

    /// Builds the service configuration from the parsed parts.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig::new(self.storage.clone(), self.scrape.clone())
    }

    /// Logs configuration at startup (no sensitive values).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            "build information"
        );

        self.server.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            storage_backend = %self.storage.backend,
            storage_container = %self.storage.container,
            scrape_timeout_secs = self.scrape.timeout_secs,
            cors_origins = ?self.cors.allowed_origins,
            "service configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_no_arguments() {
        let cli = Cli::try_parse_from(["snapper"]).unwrap();
        assert_eq!(cli.server.port, 3000);
        assert!(cli.cors.allowed_origins.is_empty());
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn parses_storage_backend_argument() {
        let cli = Cli::try_parse_from([
            "snapper",
            "--storage-backend",
            "gcs",
            "--storage-container",
            "myformsnapper-embeddings",
        ])
        .unwrap();

        let config = cli.service_config();
        assert_eq!(config.storage.container, "myformsnapper-embeddings");
    }

    #[test]
    fn rejects_unknown_backend() {
        let result = Cli::try_parse_from(["snapper", "--storage-backend", "tape"]);
        assert!(result.is_err());
    }
}
