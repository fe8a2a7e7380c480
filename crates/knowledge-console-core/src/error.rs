//! Error taxonomy for knowledge-store operations.

/// Failure of a registry, retrieval, or log operation.
///
/// `Validation` and `NotFound` are caller-facing and are always raised before
/// any mutation happens. `Internal` wraps a store failure.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl KnowledgeError {
    pub fn validation(message: impl Into<String>) -> Self {
        KnowledgeError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        KnowledgeError::NotFound(message.into())
    }
}
