//! # Knowledge Console CLI (`kc`)
//!
//! ## Usage
//!
//! ```bash
//! kc --config ./config/kc.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `kc serve` | Start the HTTP API |
//! | `kc chunk <file>` | Show how a file would be segmented |
//! | `kc search "<query>" <files...>` | Keyword search over local files |
//!
//! If the config file does not exist, built-in defaults are used. Logs go
//! to stderr; set `RUST_LOG` to change verbosity.

use clap::{Parser, Subcommand};
use knowledge_console::{chunk, config, search, server};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Knowledge Console: document ingestion, chunking, and keyword retrieval.
#[derive(Parser)]
#[command(
    name = "kc",
    about = "Knowledge Console: document ingestion, chunking, and keyword retrieval",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/kc.toml`. A missing file means built-in defaults.
    #[arg(long, global = true, default_value = "./config/kc.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server.
    ///
    /// Binds to `[server].bind`. All state is in memory and is lost when
    /// the process exits.
    Serve,

    /// Extract and chunk a file without storing it.
    Chunk {
        /// File to chunk (`.txt`, `.md`, `.pdf`, `.docx`).
        path: PathBuf,
    },

    /// Ingest files into a temporary index and search them.
    Search {
        /// Search query. Any whitespace-separated term may match.
        query: String,

        /// Files to search.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Query language, echoed for reference; does not filter results.
        #[arg(long, default_value = "en")]
        language: String,

        /// Maximum number of results (capped at 5).
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Chunk { path } => {
            chunk::run_chunk(&cfg, &path)?;
        }
        Commands::Search {
            query,
            files,
            language,
            limit,
        } => {
            search::run_search(&cfg, &query, &files, &language, limit).await?;
        }
    }

    Ok(())
}
