//! Wire types shared between the HTTP layer and the document store.

mod document;

pub use document::{Chunk, DocumentMetadata};
