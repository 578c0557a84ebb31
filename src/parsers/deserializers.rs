use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Custom deserializer for timestamps that accepts both integers (epoch ms) and RFC3339 strings.
/// Always yields epoch milliseconds.
pub fn deserialize_timestamp_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => {
            let ms = n.as_i64().ok_or_else(|| Error::custom("invalid timestamp"))?;
            // Reject values chrono cannot represent so rendering never has to
            DateTime::from_timestamp_millis(ms)
                .map(|_| ms)
                .ok_or_else(|| Error::custom("timestamp out of range"))
        }
        Value::String(s) => s
            .parse::<DateTime<Utc>>()
            .map(|dt| dt.timestamp_millis())
            .map_err(|e| Error::custom(format!("invalid RFC3339 timestamp: {}", e))),
        _ => Err(Error::custom("timestamp must be a number or string")),
    }
}

#[cfg(test)]
mod tests {
    use crate::models::HistoryItem;

    #[test]
    fn test_history_item_timestamp_integer() {
        let json = r#"{
            "id": "1762076480016",
            "query": "LoRA",
            "category": "github",
            "result": {"summary": "text", "sources": []},
            "timestamp": 1762076480016
        }"#;

        let item: HistoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.query, "LoRA");
        assert_eq!(item.timestamp, 1762076480016);
    }

    #[test]
    fn test_history_item_timestamp_rfc3339() {
        let json = r#"{
            "id": "a",
            "query": "LoRA",
            "category": "arxiv",
            "result": {"summary": "text", "sources": []},
            "timestamp": "2025-11-02T09:41:20.016Z"
        }"#;

        let item: HistoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.timestamp, 1762076480016);
    }

    #[test]
    fn test_history_item_timestamp_rejects_bool() {
        let json = r#"{
            "id": "a",
            "query": "q",
            "result": {"summary": ""},
            "timestamp": true
        }"#;

        let err = serde_json::from_str::<HistoryItem>(json).unwrap_err();
        assert!(err.to_string().contains("timestamp must be a number or string"));
    }

    #[test]
    fn test_history_item_timestamp_serializes_as_integer() {
        let json = r#"{"id":"a","query":"q","category":"general","result":{"summary":"","sources":[]},"timestamp":"2025-11-02T09:41:20.016Z"}"#;
        let item: HistoryItem = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["timestamp"], serde_json::json!(1762076480016_i64));
    }

    #[test]
    fn test_history_item_missing_category_defaults_to_general() {
        let json = r#"{"id":"a","query":"q","result":{"summary":""},"timestamp":1}"#;
        let item: HistoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.category, crate::models::ResearchCategory::General);
    }
}
