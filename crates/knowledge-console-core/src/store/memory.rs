//! In-memory [`Store`] implementation.
//!
//! The document list and the knowledge index share one `RwLock`, which is
//! the exclusion scope for ingest and cascade delete. The interaction log has
//! a lock of its own since it shares no invariant with the catalog.
//! Everything is lost when the process exits.

use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

use crate::index::{IndexedSegment, KnowledgeIndex};
use crate::models::{DeleteOutcome, Document, DocumentSummary, Interaction, Segment};

use super::{Store, StoreCounts};

/// Registered documents plus the index built from their segments.
#[derive(Default)]
struct Catalog {
    documents: Vec<Document>,
    index: KnowledgeIndex,
}

/// Process-lifetime store shared by all request handlers.
pub struct InMemoryStore {
    catalog: RwLock<Catalog>,
    interactions: RwLock<Vec<Interaction>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            catalog: RwLock::new(Catalog::default()),
            interactions: RwLock::new(Vec::new()),
        }
    }

    fn read_catalog(&self) -> Result<RwLockReadGuard<'_, Catalog>> {
        self.catalog
            .read()
            .map_err(|_| anyhow!("knowledge catalog lock poisoned"))
    }

    fn write_catalog(&self) -> Result<RwLockWriteGuard<'_, Catalog>> {
        self.catalog
            .write()
            .map_err(|_| anyhow!("knowledge catalog lock poisoned"))
    }

    fn read_log(&self) -> Result<RwLockReadGuard<'_, Vec<Interaction>>> {
        self.interactions
            .read()
            .map_err(|_| anyhow!("interaction log lock poisoned"))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn insert_document(&self, doc: &Document) -> Result<()> {
        let mut guard = self.write_catalog()?;
        let catalog = &mut *guard;
        if catalog.documents.iter().any(|d| d.id == doc.id) {
            bail!("document id already registered: {}", doc.id);
        }
        catalog.index.add_all(&doc.id, &doc.segments);
        catalog.documents.push(doc.clone());
        Ok(())
    }

    async fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
        let catalog = self.read_catalog()?;
        Ok(catalog.documents.iter().map(Document::summary).collect())
    }

    async fn get_document(&self, id: &str) -> Result<Option<Document>> {
        let catalog = self.read_catalog()?;
        Ok(catalog.documents.iter().find(|d| d.id == id).cloned())
    }

    async fn delete_document(&self, id: &str) -> Result<Option<DeleteOutcome>> {
        let mut guard = self.write_catalog()?;
        let catalog = &mut *guard;
        let Some(position) = catalog.documents.iter().position(|d| d.id == id) else {
            return Ok(None);
        };

        let segment_ids: HashSet<&str> = catalog.documents[position]
            .segments
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        let removed = catalog.index.remove_by_ids(id, &segment_ids);
        let doc = catalog.documents.remove(position);

        Ok(Some(DeleteOutcome {
            filename: doc.filename,
            segments_removed: removed,
        }))
    }

    async fn segments(&self) -> Result<Vec<IndexedSegment>> {
        let catalog = self.read_catalog()?;
        Ok(catalog.index.all().to_vec())
    }

    async fn keyword_search(&self, terms: &[String], limit: usize) -> Result<Vec<Segment>> {
        let catalog = self.read_catalog()?;
        Ok(catalog.index.scan(terms, limit))
    }

    async fn append_interaction(&self, interaction: &Interaction) -> Result<()> {
        let mut log = self
            .interactions
            .write()
            .map_err(|_| anyhow!("interaction log lock poisoned"))?;
        log.push(interaction.clone());
        Ok(())
    }

    async fn interactions(&self) -> Result<Vec<Interaction>> {
        Ok(self.read_log()?.clone())
    }

    async fn counts(&self) -> Result<StoreCounts> {
        let (documents, segments) = {
            let catalog = self.read_catalog()?;
            (catalog.documents.len(), catalog.index.len())
        };
        Ok(StoreCounts {
            documents,
            segments,
            interactions: self.read_log()?.len(),
        })
    }
}
