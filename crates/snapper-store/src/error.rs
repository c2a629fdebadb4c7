//! Document store error types.

use snapper_core::key::KeyError;
use snapper_opendal::StorageError;
use thiserror::Error;

/// Result type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced by document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field is missing, empty, or malformed. Raised before any
    /// store access happens.
    #[error("{0}")]
    InvalidInput(String),

    /// The requested document does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A stored object could not be parsed.
    #[error("corrupt document object at {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A payload could not be serialized for storage.
    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The underlying object store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StoreError {
    /// Creates an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a not-found error for the given document id.
    pub fn document_not_found(document_id: &str) -> Self {
        Self::NotFound(format!("Document {document_id} not found"))
    }
}

impl From<KeyError> for StoreError {
    fn from(err: KeyError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
