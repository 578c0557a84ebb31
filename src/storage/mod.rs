//! Durable local state: search history and UI preferences
//!
//! Everything is stored through the [`KeyValueStore`] capability (get/set by key),
//! so the on-disk [`FileStore`] can be swapped for a [`MemoryStore`] in tests or
//! ephemeral sessions.
//!
//! Keys:
//! - `research_history`: JSON array of history items, newest-first, at most 50
//! - `theme`: `"dark"` or `"light"`
//!
//! Writes are synchronous and write-through: every mutation rewrites the full value.

pub mod history_store;
pub mod kv;
pub mod preferences;

pub use history_store::{HISTORY_KEY, HistoryStore, MAX_HISTORY_ITEMS};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use preferences::{THEME_KEY, ThemeMode, load_theme, save_theme};
