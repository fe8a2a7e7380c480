//! Document registry lifecycle: ingest, list, get, and cascade delete.
//!
//! All functions operate through the [`Store`] trait. Validation runs before
//! any store call, so a rejected operation never leaves partial state behind.

use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::chunk::{chunk_text, ChunkParams};
use crate::error::KnowledgeError;
use crate::models::{DeleteOutcome, Document, DocumentSummary};
use crate::store::Store;

/// Chunk `text`, register it as a new document, and publish its segments.
///
/// Fails with [`KnowledgeError::Validation`] if the filename is blank or the
/// text is empty or whitespace-only.
pub async fn ingest_document<S: Store + ?Sized>(
    store: &S,
    filename: &str,
    text: &str,
    params: &ChunkParams,
) -> Result<Document, KnowledgeError> {
    if filename.trim().is_empty() {
        return Err(KnowledgeError::validation("filename must not be empty"));
    }
    if text.trim().is_empty() {
        return Err(KnowledgeError::validation(format!(
            "no text extracted from {}",
            filename
        )));
    }

    let doc = Document {
        id: store.new_document_id(),
        filename: filename.to_string(),
        content: text.to_string(),
        content_hash: content_hash(text),
        segments: chunk_text(text, filename, params),
        uploaded_at: Utc::now(),
    };

    store.insert_document(&doc).await?;

    tracing::info!(
        document_id = %doc.id,
        filename = %doc.filename,
        segments = doc.segments.len(),
        "ingested document"
    );
    Ok(doc)
}

/// Summaries of all live documents, in insertion order.
pub async fn list_documents<S: Store + ?Sized>(
    store: &S,
) -> Result<Vec<DocumentSummary>, KnowledgeError> {
    Ok(store.list_documents().await?)
}

/// Full document, including its segments.
pub async fn get_document<S: Store + ?Sized>(
    store: &S,
    id: &str,
) -> Result<Document, KnowledgeError> {
    store
        .get_document(id)
        .await?
        .ok_or_else(|| KnowledgeError::not_found(format!("document not found: {}", id)))
}

/// Delete a document together with every segment it owns.
///
/// Unknown ids fail with [`KnowledgeError::NotFound`] and change nothing.
pub async fn delete_document<S: Store + ?Sized>(
    store: &S,
    id: &str,
) -> Result<DeleteOutcome, KnowledgeError> {
    let outcome = store
        .delete_document(id)
        .await?
        .ok_or_else(|| KnowledgeError::not_found(format!("document not found: {}", id)))?;

    tracing::info!(
        document_id = %id,
        filename = %outcome.filename,
        segments_removed = outcome.segments_removed,
        "deleted document"
    );
    Ok(outcome)
}

fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
