//! Bounded, newest-first search history with write-through persistence

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;

use super::kv::KeyValueStore;
use crate::models::{HistoryItem, ResearchCategory, ResearchResult};
use crate::parsers::parse_history_blob;

/// Storage key holding the serialized history list
pub const HISTORY_KEY: &str = "research_history";

/// Oldest entries beyond this count are evicted silently
pub const MAX_HISTORY_ITEMS: usize = 50;

pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    items: Vec<HistoryItem>,
}

impl HistoryStore {
    /// Open the history persisted in `store`, starting empty if there is none
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let mut history = Self { store, items: Vec::new() };
        history.load();
        history
    }

    /// Rehydrate from storage.
    ///
    /// A missing, unreadable or malformed blob leaves an empty history. The
    /// problem is logged for diagnostics and never surfaced to the user.
    pub fn load(&mut self) {
        self.items = match self.store.get(HISTORY_KEY) {
            Ok(Some(blob)) => match parse_history_blob(&blob) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(error = %format!("{:#}", e), "Discarding malformed history");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "Failed to read history, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(entries = self.items.len(), "History loaded");
    }

    /// Newest-first view of the history
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Record a completed search stamped with the current time
    pub fn record(
        &mut self,
        query: &str,
        category: ResearchCategory,
        result: ResearchResult,
    ) -> Result<HistoryItem> {
        self.record_at(query, category, result, Utc::now().timestamp_millis())
    }

    /// Record a completed search with an explicit epoch-millisecond timestamp.
    ///
    /// The new item goes to the front; the list is then cut back to
    /// [`MAX_HISTORY_ITEMS`] and persisted in full. If persisting fails the
    /// in-memory list keeps the new item and the error is returned.
    pub fn record_at(
        &mut self,
        query: &str,
        category: ResearchCategory,
        result: ResearchResult,
        timestamp: i64,
    ) -> Result<HistoryItem> {
        let item = HistoryItem::new(self.next_id(timestamp), query, category, result, timestamp);

        self.items.insert(0, item.clone());
        self.items.truncate(MAX_HISTORY_ITEMS);
        self.persist()?;

        Ok(item)
    }

    /// Remove the entry with `id`. Returns whether anything was removed;
    /// an unknown id is not an error.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;

        self.persist()?;
        Ok(removed)
    }

    /// Drop every entry. Confirmation is the caller's job.
    pub fn clear(&mut self) -> Result<()> {
        self.items.clear();
        self.persist()
    }

    /// Ids derive from the creation millisecond; collisions bump to the next free value
    fn next_id(&self, timestamp: i64) -> String {
        let mut candidate = timestamp;
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }

    fn persist(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.items).context("Failed to serialize history")?;
        self.store.set(HISTORY_KEY, &blob).context("Failed to persist history")?;
        tracing::trace!(entries = self.items.len(), "History persisted");
        Ok(())
    }
}
