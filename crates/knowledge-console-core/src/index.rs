//! The knowledge index: every live segment, across all documents, in
//! insertion order.
//!
//! Segment ids are only unique within their document, so entries are keyed
//! by `(document id, segment id)`. Removal is always scoped to one document.

use std::collections::HashSet;

use crate::models::Segment;

/// A segment together with the id of the document that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedSegment {
    pub document_id: String,
    pub segment: Segment,
}

/// Ordered, mutable collection of [`IndexedSegment`]s.
///
/// The index performs no identity checks of its own; the registry
/// guarantees that a document is published at most once.
#[derive(Debug, Default)]
pub struct KnowledgeIndex {
    entries: Vec<IndexedSegment>,
}

impl KnowledgeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document's segments, preserving their order.
    pub fn add_all(&mut self, document_id: &str, segments: &[Segment]) {
        self.entries.reserve(segments.len());
        for segment in segments {
            self.entries.push(IndexedSegment {
                document_id: document_id.to_string(),
                segment: segment.clone(),
            });
        }
    }

    /// Remove the listed segments of `document_id`. Returns how many were removed.
    ///
    /// Surviving entries keep their relative order.
    pub fn remove_by_ids(&mut self, document_id: &str, ids: &HashSet<&str>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| {
            !(entry.document_id == document_id && ids.contains(entry.segment.id.as_str()))
        });
        before - self.entries.len()
    }

    pub fn all(&self) -> &[IndexedSegment] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First `limit` segments whose lower-cased content contains any of `terms`.
    ///
    /// `terms` must already be lower-cased. No terms means no matches.
    pub fn scan(&self, terms: &[String], limit: usize) -> Vec<Segment> {
        if terms.is_empty() || limit == 0 {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|entry| {
                let content = entry.segment.content.to_lowercase();
                terms.iter().any(|term| content.contains(term.as_str()))
            })
            .take(limit)
            .map(|entry| entry.segment.clone())
            .collect()
    }
}
