use anyhow::{Context, Result};

use crate::models::HistoryItem;
use crate::storage::MAX_HISTORY_ITEMS;

/// Parse a persisted history blob (JSON array, newest-first).
///
/// All-or-nothing: any malformed element rejects the whole blob and the
/// caller falls back to an empty history. Blobs longer than [`MAX_HISTORY_ITEMS`] are truncated to
/// the newest entries.
pub fn parse_history_blob(blob: &str) -> Result<Vec<HistoryItem>> {
    let mut items: Vec<HistoryItem> =
        serde_json::from_str(blob).context("Failed to parse persisted history")?;

    if items.len() > MAX_HISTORY_ITEMS {
        tracing::debug!(
            found = items.len(),
            max = MAX_HISTORY_ITEMS,
            "Persisted history over capacity, dropping oldest entries"
        );
        items.truncate(MAX_HISTORY_ITEMS);
    }

    Ok(items)
}
