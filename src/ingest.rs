//! Upload ingestion pipeline.
//!
//! Validates an uploaded file against the `[upload]` config, extracts its
//! text, and registers it through the core registry:
//!
//! ```text
//! Upload ──► resolve type ──► allowed? ──► size ok? ──► extract ──► non-empty? ──► ingest_document
//! ```
//!
//! Every check runs before the store is touched, so a rejected upload leaves
//! no trace.

use anyhow::Context;
use knowledge_console_core::registry::ingest_document;
use knowledge_console_core::{Document, KnowledgeError};
use std::path::Path;

use crate::extract::resolve_content_type;
use crate::state::AppState;

/// A file as received from a client.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    /// Declared content type, if the client sent one.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A successfully ingested upload.
#[derive(Debug, Clone)]
pub struct IngestedUpload {
    pub document: Document,
    /// Resolved content type.
    pub content_type: String,
    /// Upload size in bytes.
    pub size: usize,
}

/// Read a local file as an upload with no declared content type.
pub fn read_upload(path: &Path) -> anyhow::Result<Upload> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("Not a file path: {}", path.display()))?;
    Ok(Upload {
        filename,
        content_type: None,
        bytes,
    })
}

pub async fn ingest_upload(
    state: &AppState,
    upload: Upload,
) -> Result<IngestedUpload, KnowledgeError> {
    let limits = &state.config.upload;

    let content_type = resolve_content_type(&upload.filename, upload.content_type.as_deref());
    if !limits.allowed_types.iter().any(|t| t == &content_type) {
        return Err(KnowledgeError::validation(format!(
            "Unsupported file type: {}",
            content_type
        )));
    }

    let size = upload.bytes.len();
    if size > limits.max_bytes {
        return Err(KnowledgeError::validation(format!(
            "File too large (max {} bytes)",
            limits.max_bytes
        )));
    }

    let text = state
        .extractor
        .extract(&upload.filename, &content_type, &upload.bytes)
        .map_err(|e| KnowledgeError::validation(e.to_string()))?;
    if text.trim().is_empty() {
        return Err(KnowledgeError::validation("Could not extract text from file"));
    }

    let params = state.config.chunking.params();
    let document = ingest_document(state.store.as_ref(), &upload.filename, &text, &params).await?;

    Ok(IngestedUpload {
        document,
        content_type,
        size,
    })
}
