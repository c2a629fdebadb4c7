//! Document key module
//!
//! Owns the object-store key convention for documents:
//! `users/{userId}/documents/{documentId}/{chunks.json|metadata.json}`.
//! Every consumer that builds or parses document keys goes through this
//! module so the segment positions stay in one place.

mod document;

pub use document::{
    CHUNKS_FILE, DocumentKey, KeyError, METADATA_FILE, object_name, parse_document_id,
    user_prefix,
};
