//! TOML configuration parsing and validation.
//!
//! Every section is optional; missing keys take the defaults below, so an
//! empty file (or no file at all) yields a working console.
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:7341"
//!
//! [upload]
//! max_bytes = 10485760
//! allowed_types = ["application/pdf", "text/plain"]
//!
//! [chunking]
//! min_paragraph_chars = 50
//! window_chars = 500
//!
//! [retrieval]
//! final_limit = 5
//! ```

use anyhow::{bail, Context, Result};
use knowledge_console_core::chunk::{ChunkParams, DEFAULT_MIN_PARAGRAPH_CHARS, DEFAULT_WINDOW_CHARS};
use knowledge_console_core::search::MAX_RESULTS;
use serde::Deserialize;
use std::path::Path;

use crate::extract::{MIME_DOCX, MIME_PDF, MIME_TEXT};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7341".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            allowed_types: default_allowed_types(),
        }
    }
}

fn default_max_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_allowed_types() -> Vec<String> {
    vec![
        MIME_PDF.to_string(),
        MIME_DOCX.to_string(),
        MIME_TEXT.to_string(),
    ]
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    #[serde(default = "default_min_paragraph_chars")]
    pub min_paragraph_chars: usize,
    #[serde(default = "default_window_chars")]
    pub window_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            min_paragraph_chars: default_min_paragraph_chars(),
            window_chars: default_window_chars(),
        }
    }
}

fn default_min_paragraph_chars() -> usize {
    DEFAULT_MIN_PARAGRAPH_CHARS
}
fn default_window_chars() -> usize {
    DEFAULT_WINDOW_CHARS
}

impl ChunkingConfig {
    pub fn params(&self) -> ChunkParams {
        ChunkParams {
            min_paragraph_chars: self.min_paragraph_chars,
            window_chars: self.window_chars,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_final_limit")]
    pub final_limit: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            final_limit: default_final_limit(),
        }
    }
}

fn default_final_limit() -> usize {
    MAX_RESULTS
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.chunking.window_chars == 0 {
            bail!("chunking.window_chars must be > 0");
        }
        if self.upload.max_bytes == 0 {
            bail!("upload.max_bytes must be > 0");
        }
        if self.upload.allowed_types.is_empty() {
            bail!("upload.allowed_types must list at least one content type");
        }
        if !(1..=MAX_RESULTS).contains(&self.retrieval.final_limit) {
            bail!("retrieval.final_limit must be in [1, {}]", MAX_RESULTS);
        }
        Ok(())
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

/// Load `path` if it exists, otherwise fall back to built-in defaults.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::info!(path = %path.display(), "config file not found, using defaults");
        Ok(Config::default())
    }
}
