//! # Knowledge Console
//!
//! An administrative console for a small document knowledge base: upload
//! files, see how they were chunked, run keyword searches over them, and
//! exercise a stub chat endpoint whose exchanges are logged.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌─────────────┐   ┌──────────────────────┐
//! │  Upload  │──▶│  Extract +  │──▶│   InMemoryStore      │
//! │ (HTTP /  │   │   Chunk     │   │ documents + index    │
//! │   CLI)   │   └─────────────┘   │ interaction log      │
//! └──────────┘                     └──────────┬───────────┘
//!                                             │
//!                      ┌──────────────────────┤
//!                      ▼                      ▼
//!                 ┌──────────┐          ┌──────────┐
//!                 │   CLI    │          │   HTTP   │
//!                 │   (kc)   │          │  (axum)  │
//!                 └──────────┘          └──────────┘
//! ```
//!
//! Chunking, the index, retrieval, and the interaction log live in the
//! transport-free `knowledge-console-core` crate. This crate adds config,
//! text extraction, the upload pipeline, and the two frontends.
//!
//! ## Quick Start
//!
//! ```bash
//! kc chunk ./notes.txt                      # preview segmentation
//! kc search "deployment" ./a.txt ./b.txt    # one-shot keyword search
//! kc serve                                  # start the HTTP API
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`extract`] | Upload text extraction |
//! | [`ingest`] | Upload validation and ingestion |
//! | [`state`] | Shared application state |
//! | [`server`] | HTTP API |
//! | [`chunk`] | `kc chunk` command |
//! | [`search`] | `kc search` command |

pub mod chunk;
pub mod config;
pub mod extract;
pub mod ingest;
pub mod search;
pub mod server;
pub mod state;
