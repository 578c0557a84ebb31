use serde::{Deserialize, Serialize};

use super::research::{ResearchCategory, ResearchResult};

/// Immutable snapshot of one completed search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub query: String,
    #[serde(default)]
    pub category: ResearchCategory,
    pub result: ResearchResult,
    /// Creation time in epoch milliseconds
    #[serde(deserialize_with = "crate::parsers::deserializers::deserialize_timestamp_millis")]
    pub timestamp: i64,
}

impl HistoryItem {
    pub fn new(
        id: impl Into<String>,
        query: impl Into<String>,
        category: ResearchCategory,
        result: ResearchResult,
        timestamp: i64,
    ) -> Self {
        Self { id: id.into(), query: query.into(), category, result, timestamp }
    }
}
