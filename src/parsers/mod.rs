//! Parsers for backend output and persisted history
//!
//! - [`sources`]: pulls `[label](url)` links out of a markdown summary. Best effort,
//!   never fails: text with no recognizable links simply yields no sources.
//! - [`history`]: decodes the persisted history blob. All-or-nothing; the history
//!   store treats any error as "start with an empty history".
//! - [`deserializers`]: serde helpers for fields with more than one accepted encoding.

pub mod deserializers;
pub mod history;
pub mod sources;

pub use history::parse_history_blob;
pub use sources::extract_sources;
