//! Handlers for saving, retrieving, and deleting document embeddings.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use serde::{Deserialize, Serialize};
use snapper_core::types::{Chunk, DocumentMetadata};
use snapper_store::DocumentStore;
use validator::{Validate, ValidationError};

use crate::extract::{Json, ValidateJson};
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for embeddings operations.
const TRACING_TARGET: &str = "snapper_server::handler::embeddings";

/// Storage tier reported in save responses.
const STORAGE_TIER: &str = "cloud";

fn validate_key_segment(value: &str) -> Result<(), ValidationError> {
    if value.contains('/') {
        let mut error = ValidationError::new("path_separator");
        error.message = Some("must not contain '/'".into());
        return Err(error);
    }
    Ok(())
}

/// Request payload for saving a document's embeddings.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct SaveEmbeddingsRequest {
    /// Owner of the document.
    #[validate(
        length(min = 1, message = "must not be empty"),
        custom(function = validate_key_segment)
    )]
    pub user_id: String,
    /// Identifier of the document.
    #[validate(
        length(min = 1, message = "must not be empty"),
        custom(function = validate_key_segment)
    )]
    pub document_id: String,
    /// Name of the uploaded source file.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub file_name: String,
    /// Ordered chunk records to persist.
    #[validate(length(min = 1, message = "array is empty"))]
    pub chunks: Vec<Chunk>,
    /// Summary record persisted alongside the chunks.
    pub metadata: DocumentMetadata,
}

/// Response returned when a document was saved.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveEmbeddingsResponse {
    pub success: bool,
    pub document_id: String,
    pub chunks_saved: usize,
    pub storage_url: String,
    pub storage: String,
    pub message: String,
}

#[tracing::instrument(skip_all)]
async fn save_embeddings(
    State(store): State<DocumentStore>,
    ValidateJson(request): ValidateJson<SaveEmbeddingsRequest>,
) -> Result<(StatusCode, Json<SaveEmbeddingsResponse>)> {
    tracing::info!(
        target: TRACING_TARGET,
        user_id = %request.user_id,
        document_id = %request.document_id,
        file_name = %request.file_name,
        chunks = request.chunks.len(),
        "saving embeddings",
    );

    let outcome = store
        .save(
            &request.user_id,
            &request.document_id,
            &request.file_name,
            &request.chunks,
            &request.metadata,
        )
        .await?;

    let message = format!(
        "Successfully saved {} chunks for {}",
        outcome.chunks_saved, request.file_name
    );

    Ok((
        StatusCode::OK,
        Json(SaveEmbeddingsResponse {
            success: true,
            document_id: request.document_id,
            chunks_saved: outcome.chunks_saved,
            storage_url: outcome.storage_url,
            storage: STORAGE_TIER.to_owned(),
            message,
        }),
    ))
}

/// Request payload for retrieving embeddings.
///
/// Without a `documentId` every document belonging to the user is
/// returned.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct RetrieveEmbeddingsRequest {
    /// Owner of the documents.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub user_id: String,
    /// Identifier of a single document to retrieve.
    #[serde(default)]
    pub document_id: Option<String>,
}

/// Response returned for a retrieve request.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RetrieveEmbeddingsResponse {
    pub success: bool,
    pub chunks: Vec<Chunk>,
    pub metadata: Vec<DocumentMetadata>,
    pub documents_count: usize,
    pub message: String,
}

#[tracing::instrument(skip_all)]
async fn retrieve_embeddings(
    State(store): State<DocumentStore>,
    ValidateJson(request): ValidateJson<RetrieveEmbeddingsRequest>,
) -> Result<(StatusCode, Json<RetrieveEmbeddingsResponse>)> {
    // An empty documentId selects the all-documents mode, same as
    // omitting the field.
    let document_id = request.document_id.as_deref().filter(|id| !id.is_empty());

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %request.user_id,
        document_id = document_id.unwrap_or("<all>"),
        "retrieving embeddings",
    );

    let outcome = match document_id {
        Some(document_id) => store.retrieve_document(&request.user_id, document_id).await?,
        None => store.retrieve_all(&request.user_id).await?,
    };

    let message = if outcome.is_empty() {
        "No documents found".to_owned()
    } else {
        format!(
            "Retrieved {} chunks from {} documents",
            outcome.chunks.len(),
            outcome.documents_count()
        )
    };

    Ok((
        StatusCode::OK,
        Json(RetrieveEmbeddingsResponse {
            success: true,
            documents_count: outcome.documents_count(),
            chunks: outcome.chunks,
            metadata: outcome.metadata,
            message,
        }),
    ))
}

/// Request payload for deleting embeddings.
///
/// Without a `documentId` every document belonging to the user is
/// deleted.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct DeleteEmbeddingsRequest {
    /// Owner of the documents.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub user_id: String,
    /// Identifier of a single document to delete.
    #[serde(default)]
    pub document_id: Option<String>,
}

/// Response returned for a delete request.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteEmbeddingsResponse {
    pub success: bool,
    pub documents_deleted: usize,
    pub message: String,
}

#[tracing::instrument(skip_all)]
async fn delete_embeddings(
    State(store): State<DocumentStore>,
    ValidateJson(request): ValidateJson<DeleteEmbeddingsRequest>,
) -> Result<(StatusCode, Json<DeleteEmbeddingsResponse>)> {
    let document_id = request.document_id.as_deref().filter(|id| !id.is_empty());

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %request.user_id,
        document_id = document_id.unwrap_or("<all>"),
        "deleting embeddings",
    );

    let (outcome, message) = match document_id {
        Some(document_id) => {
            let outcome = store.delete_document(&request.user_id, document_id).await?;
            let message = format!("Successfully deleted document {document_id}");
            (outcome, message)
        }
        None => {
            let outcome = store.delete_all(&request.user_id).await?;
            let message = if outcome.documents_deleted == 0 {
                "No documents to delete".to_owned()
            } else {
                format!(
                    "Successfully deleted {} documents for user {}",
                    outcome.documents_deleted, request.user_id
                )
            };
            (outcome, message)
        }
    };

    Ok((
        StatusCode::OK,
        Json(DeleteEmbeddingsResponse {
            success: true,
            documents_deleted: outcome.documents_deleted,
            message,
        }),
    ))
}

/// Returns a [`Router`] with all embeddings routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/save-embeddings", post(save_embeddings))
        .route("/retrieve-embeddings", post(retrieve_embeddings))
        .route("/delete-embeddings", post(delete_embeddings))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::handler::test::create_default_test_server;

    fn save_request(user_id: &str, document_id: &str, chunk_count: usize) -> Value {
        let chunks: Vec<Value> = (0..chunk_count)
            .map(|index| {
                json!({
                    "fileName": "resume.pdf",
                    "chunkIndex": index,
                    "text": format!("chunk {index}"),
                    "embedding": [0.1, 0.2, 0.3],
                    "timestamp": 1234567890,
                })
            })
            .collect();

        json!({
            "userId": user_id,
            "documentId": document_id,
            "fileName": "resume.pdf",
            "chunks": chunks,
            "metadata": {
                "fileName": "resume.pdf",
                "documentId": document_id,
                "chunksProcessed": chunk_count,
                "uploadedAt": 1234567890,
            },
        })
    }

    #[tokio::test]
    async fn save_then_retrieve_single_document() -> anyhow::Result<()> {
        let server = create_default_test_server().await?;

        let response = server
            .post("/save-embeddings")
            .json(&save_request("user_1", "doc_1", 3))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["documentId"], json!("doc_1"));
        assert_eq!(body["chunksSaved"], json!(3));
        assert_eq!(body["storage"], json!("cloud"));
        assert_eq!(
            body["storageUrl"],
            json!("memory://snapper-embeddings/users/user_1/documents/doc_1/chunks.json")
        );
        assert_eq!(body["message"], json!("Successfully saved 3 chunks for resume.pdf"));

        let response = server
            .post("/retrieve-embeddings")
            .json(&json!({"userId": "user_1", "documentId": "doc_1"}))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["chunks"].as_array().unwrap().len(), 3);
        assert_eq!(body["metadata"].as_array().unwrap().len(), 1);
        assert_eq!(body["documentsCount"], json!(1));
        assert_eq!(body["chunks"][0]["chunkIndex"], json!(0));
        Ok(())
    }

    #[tokio::test]
    async fn retrieve_missing_document_is_404() -> anyhow::Result<()> {
        let server = create_default_test_server().await?;

        let response = server
            .post("/retrieve-embeddings")
            .json(&json!({"userId": "user_1", "documentId": "doc_9"}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body = response.json::<Value>();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("Document doc_9 not found"));
        Ok(())
    }

    #[tokio::test]
    async fn retrieve_all_for_empty_user_is_success() -> anyhow::Result<()> {
        let server = create_default_test_server().await?;

        let response = server
            .post("/retrieve-embeddings")
            .json(&json!({"userId": "user_1"}))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["chunks"], json!([]));
        assert_eq!(body["metadata"], json!([]));
        assert_eq!(body["documentsCount"], json!(0));
        assert_eq!(body["message"], json!("No documents found"));
        Ok(())
    }

    #[tokio::test]
    async fn retrieve_all_aggregates_two_documents() -> anyhow::Result<()> {
        let server = create_default_test_server().await?;

        server
            .post("/save-embeddings")
            .json(&save_request("user_1", "doc_a", 2))
            .await
            .assert_status_ok();
        server
            .post("/save-embeddings")
            .json(&save_request("user_1", "doc_b", 3))
            .await
            .assert_status_ok();

        let response = server
            .post("/retrieve-embeddings")
            .json(&json!({"userId": "user_1"}))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["documentsCount"], json!(2));
        assert_eq!(body["chunks"].as_array().unwrap().len(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn delete_specific_document() -> anyhow::Result<()> {
        let server = create_default_test_server().await?;

        server
            .post("/save-embeddings")
            .json(&save_request("user_1", "doc_1", 1))
            .await
            .assert_status_ok();

        let response = server
            .post("/delete-embeddings")
            .json(&json!({"userId": "user_1", "documentId": "doc_1"}))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["documentsDeleted"], json!(1));
        assert_eq!(body["message"], json!("Successfully deleted document doc_1"));

        let response = server
            .post("/retrieve-embeddings")
            .json(&json!({"userId": "user_1", "documentId": "doc_1"}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_document_is_404() -> anyhow::Result<()> {
        let server = create_default_test_server().await?;

        let response = server
            .post("/delete-embeddings")
            .json(&json!({"userId": "user_1", "documentId": "doc_9"}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body = response.json::<Value>();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("Document doc_9 not found"));
        Ok(())
    }

    #[tokio::test]
    async fn delete_all_documents_reports_distinct_count() -> anyhow::Result<()> {
        let server = create_default_test_server().await?;

        for document_id in ["doc_a", "doc_b"] {
            server
                .post("/save-embeddings")
                .json(&save_request("user_1", document_id, 1))
                .await
                .assert_status_ok();
        }

        let response = server
            .post("/delete-embeddings")
            .json(&json!({"userId": "user_1"}))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["documentsDeleted"], json!(2));
        assert_eq!(
            body["message"],
            json!("Successfully deleted 2 documents for user user_1")
        );

        let response = server
            .post("/retrieve-embeddings")
            .json(&json!({"userId": "user_1"}))
            .await;
        let body = response.json::<Value>();
        assert_eq!(body["documentsCount"], json!(0));
        Ok(())
    }

    #[tokio::test]
    async fn delete_all_for_empty_user_succeeds() -> anyhow::Result<()> {
        let server = create_default_test_server().await?;

        let response = server
            .post("/delete-embeddings")
            .json(&json!({"userId": "nobody"}))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["documentsDeleted"], json!(0));
        assert_eq!(body["message"], json!("No documents to delete"));
        Ok(())
    }

    #[tokio::test]
    async fn save_with_empty_chunks_is_400() -> anyhow::Result<()> {
        let server = create_default_test_server().await?;

        let mut request = save_request("user_1", "doc_1", 0);
        request["chunks"] = json!([]);

        let response = server.post("/save-embeddings").json(&request).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body = response.json::<Value>();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("chunks array is empty"));
        Ok(())
    }

    #[tokio::test]
    async fn save_with_missing_field_names_the_field() -> anyhow::Result<()> {
        let server = create_default_test_server().await?;

        let mut request = save_request("user_1", "doc_1", 1);
        request.as_object_mut().unwrap().remove("fileName");

        let response = server.post("/save-embeddings").json(&request).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body = response.json::<Value>();
        assert_eq!(body["success"], json!(false));
        let error = body["error"].as_str().unwrap();
        assert!(error.contains("fileName"), "error does not name field: {error}");
        Ok(())
    }

    #[tokio::test]
    async fn save_with_empty_user_id_is_400() -> anyhow::Result<()> {
        let server = create_default_test_server().await?;

        let response = server
            .post("/save-embeddings")
            .json(&save_request("", "doc_1", 1))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body = response.json::<Value>();
        let error = body["error"].as_str().unwrap();
        assert!(error.contains("userId"), "error does not name field: {error}");
        Ok(())
    }

    #[tokio::test]
    async fn save_with_separator_in_document_id_is_400() -> anyhow::Result<()> {
        let server = create_default_test_server().await?;

        let response = server
            .post("/save-embeddings")
            .json(&save_request("user_1", "doc/../1", 1))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body = response.json::<Value>();
        let error = body["error"].as_str().unwrap();
        assert!(error.contains("documentId"), "error does not name field: {error}");
        Ok(())
    }

    #[tokio::test]
    async fn save_without_body_is_400() -> anyhow::Result<()> {
        let server = create_default_test_server().await?;

        let response = server.post("/save-embeddings").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body = response.json::<Value>();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("No JSON data provided"));
        Ok(())
    }

    #[tokio::test]
    async fn retrieve_with_empty_document_id_uses_all_mode() -> anyhow::Result<()> {
        let server = create_default_test_server().await?;

        server
            .post("/save-embeddings")
            .json(&save_request("user_1", "doc_1", 1))
            .await
            .assert_status_ok();

        // An empty id behaves like an omitted one rather than a 404.
        let response = server
            .post("/retrieve-embeddings")
            .json(&json!({"userId": "user_1", "documentId": ""}))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["documentsCount"], json!(1));
        Ok(())
    }
}
