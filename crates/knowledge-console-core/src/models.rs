//! Core data models used throughout Knowledge Console.
//!
//! These types represent the documents, segments, and interactions that flow
//! through ingestion, retrieval, and the interaction log. All of them
//! serialize with camelCase field names, which is the JSON shape the admin
//! API speaks.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Where a segment came from inside its document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentMetadata {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// `paragraph-<n>` or `chars-<start>-<end>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// A retrievable span of a document's text.
///
/// The id is `<filename>-chunk-<n>`: unique within the owning document and
/// stable for a given input, but not across documents that share a filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    pub content: String,
    pub source: String,
    pub metadata: SegmentMetadata,
}

/// An ingested file: its extracted text plus the segments derived from it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub content: String,
    /// SHA-256 of `content`, hex encoded.
    pub content_hash: String,
    pub segments: Vec<Segment>,
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id.clone(),
            filename: self.filename.clone(),
            segment_count: self.segments.len(),
            content_length: self.content.chars().count(),
            uploaded_at: self.uploaded_at,
        }
    }
}

/// Listing view of a [`Document`], without its text or segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: String,
    pub filename: String,
    /// Serialized as `chunks`, the name the console's upload and delete
    /// responses also use.
    #[serde(rename = "chunks")]
    pub segment_count: usize,
    pub content_length: usize,
    pub uploaded_at: DateTime<Utc>,
}

/// Result of a cascade delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub filename: String,
    pub segments_removed: usize,
}

/// One logged message/reply exchange. Never mutated once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: String,
    pub message: String,
    pub language: String,
    pub reply: String,
    pub timestamp: DateTime<Utc>,
}
