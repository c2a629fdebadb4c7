//! Document chunk and metadata types.
//!
//! These records are treated as opaque payloads: the server stores and
//! returns them verbatim and never inspects their contents beyond list
//! membership. Field names follow the camelCase wire format.

use serde::{Deserialize, Serialize};

/// One unit of extracted text plus its embedding vector and positional
/// index within a source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Name of the source file this chunk was extracted from.
    pub file_name: String,
    /// Zero-based position of this chunk within the source file.
    pub chunk_index: u32,
    /// The extracted text.
    pub text: String,
    /// Embedding vector. Dimensionality is fixed by convention upstream
    /// and not enforced here.
    pub embedding: Vec<f32>,
    /// Epoch timestamp assigned by the producer.
    pub timestamp: i64,
}

/// Summary record stored alongside a document's chunks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Name of the uploaded source file.
    pub file_name: String,
    /// Identifier of the document this record describes.
    pub document_id: String,
    /// Number of chunks produced for the document.
    pub chunks_processed: i64,
    /// Epoch timestamp of the upload.
    pub uploaded_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_uses_camel_case_wire_names() {
        let chunk = Chunk {
            file_name: "resume.pdf".to_owned(),
            chunk_index: 0,
            text: "chunk text".to_owned(),
            embedding: vec![0.1, 0.2],
            timestamp: 1234567890,
        };

        let json = serde_json::to_value(&chunk).unwrap();
        assert!(json.get("fileName").is_some());
        assert!(json.get("chunkIndex").is_some());
        assert!(json.get("file_name").is_none());
    }

    #[test]
    fn metadata_round_trips_verbatim() {
        let raw = serde_json::json!({
            "fileName": "resume.pdf",
            "documentId": "doc_456",
            "chunksProcessed": 5,
            "uploadedAt": 1234567890,
        });

        let metadata: DocumentMetadata = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(metadata.document_id, "doc_456");
        assert_eq!(serde_json::to_value(&metadata).unwrap(), raw);
    }
}
