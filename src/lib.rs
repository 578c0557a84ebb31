//! Tech Researcher - research AI papers, repositories and models from the terminal
//!
//! This library sends free-text research queries to a research backend and keeps
//! a local history of the answers. It supports:
//!
//! - Annotating queries with a research category (arxiv, github, models, general)
//! - Fetching a markdown summary over HTTP and extracting its cited sources
//! - A bounded, newest-first search history persisted in a key-value store
//! - A controller shared by the interactive TUI and the one-shot CLI commands
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tech_researcher::{
//!     HistoryStore, HttpBackend, MemoryStore, ResearchCategory, ResearchClient,
//!     ResearchController,
//! };
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let backend = HttpBackend::new("http://localhost:8000/api/research", None)?;
//! let client = ResearchClient::new(Arc::new(backend));
//! let history = HistoryStore::open(Arc::new(MemoryStore::new()));
//!
//! let mut controller = ResearchController::new(client, history);
//! controller.set_query("Efficient LoRA");
//! controller.submit(None, Some(ResearchCategory::Github)).await?;
//!
//! for source in &controller.result().unwrap().sources {
//!     println!("{} -> {}", source.title, source.uri);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod models;
pub mod parsers;
pub mod storage;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use client::{HttpBackend, ResearchBackend, ResearchClient};
pub use controller::ResearchController;
pub use error::{ResearchError, SearchError, SubmitError};
pub use models::{HistoryItem, ResearchCategory, ResearchResult, ResearchSource};
pub use parsers::extract_sources;
pub use storage::{FileStore, HistoryStore, KeyValueStore, MemoryStore};
pub use utils::paths::format_path_with_tilde;
