//! HTTP error handling for request handlers.
//!
//! Every error leaving a handler serializes to the wire shape
//! `{"success": false, "error": "<message>"}` with a status code derived
//! from its kind.

use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use snapper_store::StoreError;

/// A specialized [`Result`] type for HTTP handlers.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type for HTTP handlers in the server.
#[must_use = "errors do nothing unless serialized"]
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
}

impl Error {
    /// Creates a new [`Error`] with the specified kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Sets a custom user-facing message for the error.
    #[inline]
    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the user-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or_else(|| self.kind.default_message())
    }
}

impl Default for Error {
    #[inline]
    fn default() -> Self {
        Self::new(ErrorKind::default())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.kind,
            self.kind.status_code(),
            self.message()
        )
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.message().to_owned(),
        };

        (self.kind.status_code(), Json(body)).into_response()
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Wire representation of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

/// The possible HTTP error kinds, organized by status code.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400 Bad Request - Missing or invalid request data
    BadRequest,
    /// 404 Not Found - Requested document not found
    NotFound,
    /// 500 Internal Server Error - Unexpected server error
    #[default]
    Internal,
    /// 500 Internal Server Error - Forwarding target failed
    Upstream,
}

impl ErrorKind {
    /// Converts this error kind into a full [`Error`].
    #[inline]
    pub fn into_error(self) -> Error {
        Error::new(self)
    }

    /// Creates an [`Error`] with the specified message.
    #[inline]
    pub fn with_message(self, message: impl Into<String>) -> Error {
        Error::new(self).with_message(message)
    }

    /// Returns the HTTP status code for this error kind.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal | Self::Upstream => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message used when no custom one is set.
    fn default_message(self) -> &'static str {
        match self {
            Self::BadRequest => "Invalid request data",
            Self::NotFound => "The requested resource was not found",
            Self::Internal => "An internal server error occurred",
            Self::Upstream => "Scraping service unavailable",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BadRequest => "bad_request",
            Self::NotFound => "not_found",
            Self::Internal => "internal_server_error",
            Self::Upstream => "upstream_error",
        };
        write!(f, "{name}")
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.into_error().into_response()
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidInput(message) => ErrorKind::BadRequest.with_message(message),
            StoreError::NotFound(message) => ErrorKind::NotFound.with_message(message),
            other => ErrorKind::Internal.with_message(other.to_string()),
        }
    }
}

impl From<snapper_scrape::Error> for Error {
    fn from(err: snapper_scrape::Error) -> Self {
        let error = Error::new(ErrorKind::Upstream);
        match err.message {
            Some(message) => error.with_message(message),
            None => error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_error_is_internal() {
        let error = Error::default();
        assert_eq!(error.kind(), ErrorKind::Internal);
        assert_eq!(error.kind().status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn custom_message_wins_over_default() {
        let error = ErrorKind::NotFound.with_message("Document doc_1 not found");
        assert_eq!(error.message(), "Document doc_1 not found");

        let error = ErrorKind::NotFound.into_error();
        assert_eq!(error.message(), "The requested resource was not found");
    }

    #[test]
    fn store_errors_map_to_status_codes() {
        let error: Error = StoreError::invalid_input("chunks array is empty").into();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.message(), "chunks array is empty");

        let error: Error = StoreError::document_not_found("doc_9").into();
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), "Document doc_9 not found");
    }

    #[test]
    fn scrape_errors_map_to_upstream() {
        let source = snapper_scrape::Error::new(snapper_scrape::ErrorKind::ExternalError)
            .with_message("Scraping service error: 502");
        let error: Error = source.into();
        assert_eq!(error.kind(), ErrorKind::Upstream);
        assert_eq!(error.message(), "Scraping service error: 502");
    }

    #[test]
    fn display_contains_kind_and_message() {
        let error = ErrorKind::BadRequest.with_message("userId must not be empty");
        let display = error.to_string();
        assert!(display.contains("bad_request"));
        assert!(display.contains("400"));
        assert!(display.contains("userId must not be empty"));
    }
}
