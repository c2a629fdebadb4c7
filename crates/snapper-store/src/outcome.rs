//! Result types returned by document store operations.

use snapper_core::types::{Chunk, DocumentMetadata};

/// Outcome of a save operation.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    /// Number of chunks written.
    pub chunks_saved: usize,
    /// Canonical locator of the chunks object.
    pub storage_url: String,
}

/// Outcome of a retrieve operation.
///
/// The chunk and metadata collections are not guaranteed to describe the
/// same set of documents: a document whose pair was only half written
/// contributes to one collection and not the other.
#[must_use]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrieveOutcome {
    /// Every retrieved chunk, concatenated in document-iteration order.
    pub chunks: Vec<Chunk>,
    /// Every retrieved metadata record.
    pub metadata: Vec<DocumentMetadata>,
}

impl RetrieveOutcome {
    /// Number of documents represented in the result, counted by metadata
    /// records.
    #[must_use]
    pub fn documents_count(&self) -> usize {
        self.metadata.len()
    }

    /// Returns true if the result holds no chunks and no metadata.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty() && self.metadata.is_empty()
    }
}

/// Outcome of a delete operation.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Number of distinct documents removed, not the number of objects.
    pub documents_deleted: usize,
}
