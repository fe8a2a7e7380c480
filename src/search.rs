//! `kc search`: keyword search over a set of local files.
//!
//! The files are ingested into a throwaway in-memory store through the same
//! upload pipeline the server uses, so type and size limits apply here too.

use anyhow::{Context, Result};
use knowledge_console_core::search::{search, SearchRequest};
use std::path::PathBuf;

use crate::config::Config;
use crate::ingest::{ingest_upload, read_upload};
use crate::state::AppState;

pub async fn run_search(
    config: &Config,
    query: &str,
    files: &[PathBuf],
    language: &str,
    limit: Option<usize>,
) -> Result<()> {
    if query.trim().is_empty() {
        println!("No results.");
        return Ok(());
    }

    let state = AppState::new(config.clone());
    for path in files {
        let upload = read_upload(path)?;
        ingest_upload(&state, upload)
            .await
            .with_context(|| format!("Failed to ingest {}", path.display()))?;
    }

    let limit = limit.unwrap_or(config.retrieval.final_limit);
    let req = SearchRequest::new(query, language).with_limit(limit);
    let results = search(state.store.as_ref(), &req).await?;

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, segment) in results.iter().enumerate() {
        let section = segment.metadata.section.as_deref().unwrap_or("(unsectioned)");
        println!("{}. {} / {}", i + 1, segment.source, section);
        println!("    id: {}", segment.id);
        println!(
            "    excerpt: \"{}\"",
            excerpt(&segment.content).replace('\n', " ").trim()
        );
        println!();
    }

    Ok(())
}

fn excerpt(content: &str) -> String {
    const EXCERPT_CHARS: usize = 160;
    if content.chars().count() > EXCERPT_CHARS {
        let head: String = content.chars().take(EXCERPT_CHARS).collect();
        format!("{}…", head)
    } else {
        content.to_string()
    }
}
