//! # Knowledge Console Core
//!
//! Shared, transport-free logic for Knowledge Console: data models,
//! chunking, the knowledge index, the store abstraction, the document
//! registry lifecycle, and the keyword retrieval algorithm.
//!
//! This crate contains no HTTP, filesystem I/O, or runtime-specific
//! dependencies. Frontends (the axum server, the `kc` CLI) hold a
//! [`store::Store`] implementation and call into [`registry`], [`search`],
//! [`interactions`], and [`stats`].

pub mod chunk;
pub mod error;
pub mod index;
pub mod interactions;
pub mod models;
pub mod registry;
pub mod responder;
pub mod search;
pub mod stats;
pub mod store;

pub use error::KnowledgeError;
pub use models::{DeleteOutcome, Document, DocumentSummary, Interaction, Segment, SegmentMetadata};
