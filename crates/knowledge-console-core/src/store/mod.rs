//! Storage abstraction for Knowledge Console.
//!
//! The [`Store`] trait holds the document registry, the knowledge index, and
//! the interaction log behind one interface, so the registry and retrieval
//! code never touch shared collections directly. Only the in-memory backend
//! exists today; a durable backend would implement the same trait.
//!
//! Implementations must be `Send + Sync` to be shared across request handlers.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::index::IndexedSegment;
use crate::models::{DeleteOutcome, Document, DocumentSummary, Interaction, Segment};

/// Sizes of the three collections, read under a consistent view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub documents: usize,
    pub segments: usize,
    pub interactions: usize,
}

/// Abstract storage backend.
///
/// # Consistency
///
/// [`insert_document`](Store::insert_document) and
/// [`delete_document`](Store::delete_document) must each apply to the
/// document list and the index as one indivisible step: no reader may see a
/// document without its segments or segments without their document.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`insert_document`](Store::insert_document) | Register a document and publish its segments |
/// | [`list_documents`](Store::list_documents) | Summaries in insertion order |
/// | [`get_document`](Store::get_document) | Full document by id |
/// | [`delete_document`](Store::delete_document) | Cascade delete |
/// | [`segments`](Store::segments) | Snapshot of the index |
/// | [`keyword_search`](Store::keyword_search) | Any-term substring scan |
/// | [`append_interaction`](Store::append_interaction) | Log an exchange |
/// | [`interactions`](Store::interactions) | Log in insertion order |
#[async_trait]
pub trait Store: Send + Sync {
    /// Fresh, process-unique document id.
    fn new_document_id(&self) -> String {
        format!("doc-{}", Uuid::new_v4())
    }

    /// Fresh, process-unique interaction id.
    fn new_interaction_id(&self) -> String {
        format!("chat-{}", Uuid::new_v4())
    }

    /// Store `doc` and append its segments to the index as a single batch.
    ///
    /// Fails if a document with the same id is already registered.
    async fn insert_document(&self, doc: &Document) -> Result<()>;

    async fn list_documents(&self) -> Result<Vec<DocumentSummary>>;

    async fn get_document(&self, id: &str) -> Result<Option<Document>>;

    /// Remove a document and all of its segments. `None` if the id is unknown,
    /// in which case nothing changes.
    async fn delete_document(&self, id: &str) -> Result<Option<DeleteOutcome>>;

    /// Every indexed segment with its owning document id, in index order.
    async fn segments(&self) -> Result<Vec<IndexedSegment>>;

    /// First `limit` segments, in index order, whose lower-cased content
    /// contains any of the lower-cased `terms`.
    async fn keyword_search(&self, terms: &[String], limit: usize) -> Result<Vec<Segment>>;

    async fn append_interaction(&self, interaction: &Interaction) -> Result<()>;

    /// The interaction log in insertion order.
    async fn interactions(&self) -> Result<Vec<Interaction>>;

    async fn counts(&self) -> Result<StoreCounts>;
}
