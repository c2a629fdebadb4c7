//! Storage configuration types.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Default container (bucket) name.
pub const DEFAULT_CONTAINER: &str = "snapper-embeddings";

/// Default region used when the backend creates the container.
pub const DEFAULT_REGION: &str = "us-central1";

/// Supported storage backend kinds.
///
/// Every kind is always representable in configuration; constructing an
/// operator for a kind whose cargo feature is disabled fails at runtime
/// with an initialization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString)]
#[cfg_attr(feature = "config", derive(clap::ValueEnum))]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// In-memory storage, process-local. Used by tests and development.
    Memory,
    /// Local filesystem.
    Fs,
    /// Amazon S3 compatible storage.
    S3,
    /// Google Cloud Storage.
    Gcs,
}

impl BackendKind {
    /// Returns the URL scheme used in canonical storage locators.
    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Fs => "file",
            Self::S3 => "s3",
            Self::Gcs => "gs",
        }
    }
}

/// Storage backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(clap::Args))]
#[must_use = "config does nothing unless you use it"]
pub struct StorageConfig {
    /// Which storage backend to use.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "storage-backend",
            env = "STORAGE_BACKEND",
            default_value = "memory",
            value_enum
        )
    )]
    #[serde(default = "default_backend")]
    pub backend: BackendKind,

    /// Container (bucket) name, or root directory for the fs backend.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "storage-container",
            env = "STORAGE_CONTAINER",
            default_value = DEFAULT_CONTAINER
        )
    )]
    #[serde(default = "default_container")]
    pub container: String,

    /// Region used when the container has to be created. Backends without
    /// a region concept ignore it.
    #[cfg_attr(
        feature = "config",
        arg(long = "storage-region", env = "STORAGE_REGION", default_value = DEFAULT_REGION)
    )]
    #[serde(default = "default_region")]
    pub region: String,

    /// Custom endpoint for S3-compatible stores.
    #[cfg_attr(
        feature = "config",
        arg(id = "storage-endpoint", long = "storage-endpoint", env = "STORAGE_ENDPOINT")
    )]
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Access key id for S3-compatible stores.
    #[cfg_attr(
        feature = "config",
        arg(long = "storage-access-key-id", env = "STORAGE_ACCESS_KEY_ID")
    )]
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Secret access key for S3-compatible stores.
    #[cfg_attr(
        feature = "config",
        arg(long = "storage-secret-access-key", env = "STORAGE_SECRET_ACCESS_KEY")
    )]
    #[serde(default)]
    pub secret_access_key: Option<String>,
}

fn default_backend() -> BackendKind {
    BackendKind::Memory
}

fn default_container() -> String {
    DEFAULT_CONTAINER.to_owned()
}

fn default_region() -> String {
    DEFAULT_REGION.to_owned()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::memory()
    }
}

impl StorageConfig {
    /// Returns an in-memory configuration with the default container name.
    pub fn memory() -> Self {
        Self {
            backend: BackendKind::Memory,
            container: default_container(),
            region: default_region(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
        }
    }

    /// Sets the container name.
    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    /// Returns the canonical locator of an object stored under this
    /// configuration, e.g. `gs://bucket/users/u/documents/d/chunks.json`.
    #[must_use]
    pub fn storage_url(&self, path: &str) -> String {
        format!("{}://{}/{path}", self.backend.scheme(), self.container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_memory() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.container, DEFAULT_CONTAINER);
        assert_eq!(config.region, DEFAULT_REGION);
    }

    #[test]
    fn storage_url_uses_backend_scheme() {
        let config = StorageConfig::memory().with_container("bucket");
        assert_eq!(
            config.storage_url("users/u/documents/d/chunks.json"),
            "memory://bucket/users/u/documents/d/chunks.json"
        );

        let gcs = StorageConfig {
            backend: BackendKind::Gcs,
            ..StorageConfig::memory()
        };
        assert!(gcs.storage_url("a/b").starts_with("gs://"));
    }

    #[test]
    fn backend_kind_parses_snake_case() {
        use std::str::FromStr;

        assert_eq!(BackendKind::from_str("memory").unwrap(), BackendKind::Memory);
        assert_eq!(BackendKind::from_str("s3").unwrap(), BackendKind::S3);
        assert_eq!(BackendKind::from_str("gcs").unwrap(), BackendKind::Gcs);
        assert!(BackendKind::from_str("azblob").is_err());
    }
}
