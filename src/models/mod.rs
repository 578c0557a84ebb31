//! Data models for research results and search history.
//!
//! - [`ResearchCategory`] - Closed set of query domains (arxiv, github, models, general)
//! - [`ResearchSource`] - A `{title, uri}` link extracted from a summary
//! - [`ResearchResult`] - Markdown summary plus its deduplicated sources
//! - [`HistoryItem`] - Persisted snapshot of one completed search
//!
//! All models round-trip through serde JSON; the history timestamp accepts
//! legacy RFC3339 strings via the `deserializers` module.

pub mod history;
pub mod research;

pub use history::HistoryItem;
pub use research::{ResearchCategory, ResearchResult, ResearchSource};
