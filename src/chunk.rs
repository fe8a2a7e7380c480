//! `kc chunk`: dry-run a file through extraction and chunking.
//!
//! Nothing is stored. Useful for checking how a document will be split
//! before uploading it.

use anyhow::{Context, Result};
use knowledge_console_core::chunk::chunk_text;
use std::path::Path;

use crate::config::Config;
use crate::extract::{resolve_content_type, PlaceholderExtractor, TextExtractor};
use crate::ingest::read_upload;

pub fn run_chunk(config: &Config, path: &Path) -> Result<()> {
    let upload = read_upload(path)?;
    let content_type = resolve_content_type(&upload.filename, upload.content_type.as_deref());
    let text = PlaceholderExtractor
        .extract(&upload.filename, &content_type, &upload.bytes)
        .with_context(|| format!("Failed to extract text from {}", path.display()))?;

    let segments = chunk_text(&text, &upload.filename, &config.chunking.params());

    println!(
        "--- {} ({}, {} chars) ---",
        upload.filename,
        content_type,
        text.chars().count()
    );
    for segment in &segments {
        println!(
            "[{}] {} ({} chars)",
            segment.id,
            segment.metadata.section.as_deref().unwrap_or("-"),
            segment.content.chars().count()
        );
        println!("{}", segment.content);
        println!();
    }
    println!("Segments: {}", segments.len());

    Ok(())
}
