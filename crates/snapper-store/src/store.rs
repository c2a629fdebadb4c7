//! Document store adapter over a storage backend.

use snapper_core::key::{self, CHUNKS_FILE, DocumentKey, METADATA_FILE};
use snapper_core::types::{Chunk, DocumentMetadata};
use snapper_opendal::StorageBackend;

use crate::TRACING_TARGET;
use crate::error::{StoreError, StoreResult};
use crate::outcome::{DeleteOutcome, RetrieveOutcome, SaveOutcome};

/// Object keys of a single document, collected from a prefix listing.
#[derive(Debug, Default)]
struct DocumentObjects {
    chunks: Option<String>,
    metadata: Option<String>,
}

/// Stateless adapter that persists documents as `chunks.json` +
/// `metadata.json` pairs in an object store.
///
/// The store holds no state of its own besides the backend handle; every
/// operation is independent and concurrency safety is entirely the object
/// store's responsibility.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    backend: StorageBackend,
}

impl DocumentStore {
    /// Creates a new document store over the given backend.
    pub fn new(backend: StorageBackend) -> Self {
        Self { backend }
    }

    /// Returns the underlying storage backend.
    pub fn backend(&self) -> &StorageBackend {
        &self.backend
    }

    /// Persists a document: both the chunk array and the metadata record.
    ///
    /// All inputs are validated before the first store access. Existing
    /// objects under the same key are overwritten wholesale. The two
    /// writes are independent: if the second fails, the first is not
    /// rolled back and the document is left inconsistent.
    pub async fn save(
        &self,
        user_id: &str,
        document_id: &str,
        file_name: &str,
        chunks: &[Chunk],
        metadata: &DocumentMetadata,
    ) -> StoreResult<SaveOutcome> {
        let doc_key = DocumentKey::new(user_id, document_id)?;
        if file_name.is_empty() {
            return Err(StoreError::invalid_input("fileName must not be empty"));
        }
        if chunks.is_empty() {
            return Err(StoreError::invalid_input("chunks array is empty"));
        }

        // Container races and permission quirks are tolerated here; the
        // probe failure is logged and the writes decide the outcome.
        if let Err(err) = self.backend.ensure_container().await {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %err,
                "container check failed, continuing with writes"
            );
        }

        let chunks_path = doc_key.chunks_path();
        let chunks_json = serde_json::to_vec_pretty(chunks).map_err(|source| {
            StoreError::Serialize {
                path: chunks_path.clone(),
                source,
            }
        })?;
        self.backend.write(&chunks_path, &chunks_json).await?;

        let metadata_path = doc_key.metadata_path();
        let metadata_json = serde_json::to_vec_pretty(metadata).map_err(|source| {
            StoreError::Serialize {
                path: metadata_path.clone(),
                source,
            }
        })?;
        self.backend.write(&metadata_path, &metadata_json).await?;

        let storage_url = self.backend.storage_url(&chunks_path);

        tracing::info!(
            target: TRACING_TARGET,
            user_id = %user_id,
            document_id = %document_id,
            chunks = chunks.len(),
            storage_url = %storage_url,
            "Saved document embeddings"
        );

        Ok(SaveOutcome {
            chunks_saved: chunks.len(),
            storage_url,
        })
    }

    /// Retrieves a single document.
    ///
    /// The chunk array must exist; a missing metadata record is tolerated
    /// and yields an empty metadata list.
    pub async fn retrieve_document(
        &self,
        user_id: &str,
        document_id: &str,
    ) -> StoreResult<RetrieveOutcome> {
        let doc_key = DocumentKey::new(user_id, document_id)?;

        let chunks_path = doc_key.chunks_path();
        if !self.backend.exists(&chunks_path).await? {
            return Err(StoreError::document_not_found(document_id));
        }

        let chunks = self.read_chunks(&chunks_path).await?;

        let mut metadata = Vec::new();
        let metadata_path = doc_key.metadata_path();
        if self.backend.exists(&metadata_path).await? {
            metadata.push(self.read_metadata(&metadata_path).await?);
        }

        tracing::debug!(
            target: TRACING_TARGET,
            user_id = %user_id,
            document_id = %document_id,
            chunks = chunks.len(),
            "Retrieved document"
        );

        Ok(RetrieveOutcome { chunks, metadata })
    }

    /// Retrieves every document belonging to a user.
    ///
    /// A missing container or an empty prefix is a valid, empty result.
    /// Documents with only one of their two objects present contribute
    /// partially.
    pub async fn retrieve_all(&self, user_id: &str) -> StoreResult<RetrieveOutcome> {
        let prefix = key::user_prefix(user_id)?;
        let paths = self.list_prefix(&prefix).await?;
        let documents = group_by_document(&paths);

        let mut chunks = Vec::new();
        let mut metadata = Vec::new();
        for (_, objects) in &documents {
            if let Some(path) = &objects.chunks {
                chunks.extend(self.read_chunks(path).await?);
            }
            if let Some(path) = &objects.metadata {
                metadata.push(self.read_metadata(path).await?);
            }
        }

        tracing::debug!(
            target: TRACING_TARGET,
            user_id = %user_id,
            documents = documents.len(),
            chunks = chunks.len(),
            "Retrieved all documents"
        );

        Ok(RetrieveOutcome { chunks, metadata })
    }

    /// Deletes a single document and every object under its prefix.
    ///
    /// Fails with a not-found error when no objects exist for the
    /// document.
    pub async fn delete_document(
        &self,
        user_id: &str,
        document_id: &str,
    ) -> StoreResult<DeleteOutcome> {
        let doc_key = DocumentKey::new(user_id, document_id)?;

        let paths = self.list_prefix(&doc_key.prefix()).await?;
        if paths.is_empty() {
            return Err(StoreError::document_not_found(document_id));
        }

        for path in &paths {
            self.backend.delete(path).await?;
        }

        tracing::info!(
            target: TRACING_TARGET,
            user_id = %user_id,
            document_id = %document_id,
            objects = paths.len(),
            "Deleted document"
        );

        Ok(DeleteOutcome {
            documents_deleted: 1,
        })
    }

    /// Deletes every document belonging to a user.
    ///
    /// Reports the number of distinct documents observed in the listing,
    /// not the number of objects removed. A missing container deletes
    /// nothing and succeeds.
    pub async fn delete_all(&self, user_id: &str) -> StoreResult<DeleteOutcome> {
        let prefix = key::user_prefix(user_id)?;
        let paths = self.list_prefix(&prefix).await?;

        let mut document_ids: Vec<&str> = Vec::new();
        for path in &paths {
            if let Some(id) = key::parse_document_id(path)
                && !document_ids.contains(&id)
            {
                document_ids.push(id);
            }
        }

        for path in &paths {
            self.backend.delete(path).await?;
        }

        tracing::info!(
            target: TRACING_TARGET,
            user_id = %user_id,
            documents = document_ids.len(),
            objects = paths.len(),
            "Deleted all documents"
        );

        Ok(DeleteOutcome {
            documents_deleted: document_ids.len(),
        })
    }

    /// Probes the storage backend.
    ///
    /// A missing container still counts as healthy; only a failing backend
    /// does not.
    pub async fn health_check(&self) -> bool {
        match self.backend.list("/").await {
            Ok(_) => true,
            Err(err) if err.is_not_found() => true,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %err,
                    "Storage health probe failed"
                );
                false
            }
        }
    }

    /// Lists a prefix, treating a missing container or prefix as empty.
    async fn list_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        match self.backend.list(prefix).await {
            Ok(paths) => Ok(paths),
            Err(err) if err.is_not_found() => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn read_chunks(&self, path: &str) -> StoreResult<Vec<Chunk>> {
        let data = self.backend.read(path).await?;
        serde_json::from_slice(&data).map_err(|source| StoreError::Corrupt {
            path: path.to_owned(),
            source,
        })
    }

    async fn read_metadata(&self, path: &str) -> StoreResult<DocumentMetadata> {
        let data = self.backend.read(path).await?;
        serde_json::from_slice(&data).map_err(|source| StoreError::Corrupt {
            path: path.to_owned(),
            source,
        })
    }
}

/// Groups listed object keys into documents by the fixed document-id
/// segment, preserving first-seen order.
fn group_by_document(paths: &[String]) -> Vec<(String, DocumentObjects)> {
    let mut documents: Vec<(String, DocumentObjects)> = Vec::new();

    for path in paths {
        let Some(document_id) = key::parse_document_id(path) else {
            continue;
        };
        let Some(object) = key::object_name(path) else {
            continue;
        };

        let index = match documents.iter().position(|(id, _)| id == document_id) {
            Some(index) => index,
            None => {
                documents.push((document_id.to_owned(), DocumentObjects::default()));
                documents.len() - 1
            }
        };

        match object {
            CHUNKS_FILE => documents[index].1.chunks = Some(path.clone()),
            METADATA_FILE => documents[index].1.metadata = Some(path.clone()),
            _ => {}
        }
    }

    documents
}
