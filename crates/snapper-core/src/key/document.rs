//! Typed builder and parser for document object keys.

use std::fmt;

use thiserror::Error;

/// Object name of the chunk array within a document prefix.
pub const CHUNKS_FILE: &str = "chunks.json";

/// Object name of the metadata record within a document prefix.
pub const METADATA_FILE: &str = "metadata.json";

/// Path separator used by the object store.
const SEPARATOR: char = '/';

/// Key layout: `users/{userId}/documents/{documentId}/{file}`. The document
/// id is always the 4th segment (0-indexed), regardless of what the
/// surrounding ids look like, which is why ids containing the separator are
/// rejected at construction.
const USERS_SEGMENT: &str = "users";
const DOCUMENTS_SEGMENT: &str = "documents";

/// Index of the document-id segment within a full object key.
const DOCUMENT_ID_INDEX: usize = 3;

/// Number of segments in a full object key.
const KEY_SEGMENTS: usize = 5;

/// Errors produced when a key segment fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The segment is an empty string.
    #[error("{0} must not be empty")]
    Empty(&'static str),
    /// The segment contains the path separator, which would shift the
    /// fixed segment positions for every consumer of the key-space.
    #[error("{0} must not contain '/'")]
    Separator(&'static str),
}

/// Validated (`userId`, `documentId`) pair that can produce every object
/// key belonging to one document.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentKey {
    user_id: String,
    document_id: String,
}

impl DocumentKey {
    /// Validates both identifiers and creates a new key.
    pub fn new(user_id: impl Into<String>, document_id: impl Into<String>) -> Result<Self, KeyError> {
        let user_id = user_id.into();
        let document_id = document_id.into();

        validate_segment("userId", &user_id)?;
        validate_segment("documentId", &document_id)?;

        Ok(Self {
            user_id,
            document_id,
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the document identifier.
    #[must_use]
    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Returns the prefix under which all of this document's objects live,
    /// including the trailing separator.
    #[must_use]
    pub fn prefix(&self) -> String {
        format!(
            "{USERS_SEGMENT}/{}/{DOCUMENTS_SEGMENT}/{}/",
            self.user_id, self.document_id
        )
    }

    /// Returns the key of the chunk array object.
    #[must_use]
    pub fn chunks_path(&self) -> String {
        format!("{}{CHUNKS_FILE}", self.prefix())
    }

    /// Returns the key of the metadata object.
    #[must_use]
    pub fn metadata_path(&self) -> String {
        format!("{}{METADATA_FILE}", self.prefix())
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Returns the prefix under which all of a user's documents live,
/// including the trailing separator.
pub fn user_prefix(user_id: &str) -> Result<String, KeyError> {
    validate_segment("userId", user_id)?;
    Ok(format!("{USERS_SEGMENT}/{user_id}/{DOCUMENTS_SEGMENT}/"))
}

/// Extracts the document id from a full object key.
///
/// Returns `None` for keys that do not have the expected number of
/// segments, such as directory markers.
#[must_use]
pub fn parse_document_id(path: &str) -> Option<&str> {
    let segments: Vec<&str> = path.split(SEPARATOR).collect();
    if segments.len() < KEY_SEGMENTS {
        return None;
    }
    Some(segments[DOCUMENT_ID_INDEX])
}

/// Extracts the object name (the final segment) from a full object key.
#[must_use]
pub fn object_name(path: &str) -> Option<&str> {
    let segments: Vec<&str> = path.split(SEPARATOR).collect();
    if segments.len() < KEY_SEGMENTS {
        return None;
    }
    Some(segments[KEY_SEGMENTS - 1])
}

fn validate_segment(field: &'static str, value: &str) -> Result<(), KeyError> {
    if value.is_empty() {
        return Err(KeyError::Empty(field));
    }
    if value.contains(SEPARATOR) {
        return Err(KeyError::Separator(field));
    }
    Ok(())
}
