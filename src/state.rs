//! Process-wide application state.
//!
//! One [`AppState`] is built at startup and cloned into every request
//! handler. It owns the store and the pluggable extractor/responder; nothing
//! lives in globals.

use std::sync::Arc;

use knowledge_console_core::responder::{ResponseGenerator, TemplateResponder};
use knowledge_console_core::store::memory::InMemoryStore;
use knowledge_console_core::store::Store;

use crate::config::Config;
use crate::extract::{PlaceholderExtractor, TextExtractor};

/// Shared state passed to route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn Store>,
    pub extractor: Arc<dyn TextExtractor>,
    pub responder: Arc<dyn ResponseGenerator>,
}

impl AppState {
    /// Fresh in-memory store with the default extractor and responder.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(InMemoryStore::new()),
            extractor: Arc::new(PlaceholderExtractor),
            responder: Arc::new(TemplateResponder),
        }
    }

    pub fn with_store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = store;
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_responder(mut self, responder: Arc<dyn ResponseGenerator>) -> Self {
        self.responder = responder;
        self
    }
}
