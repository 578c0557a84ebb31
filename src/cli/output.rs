//! Plain-text rendering of results and history for stdout.
//!
//! Every backend-derived string passes through [`strip_ansi_codes`] first.

use std::fmt::Write;

use chrono::DateTime;

use crate::models::{HistoryItem, ResearchResult};
use crate::utils::strip_ansi_codes;

/// `YYYY-MM-DD HH:MM:SS` in UTC
pub(crate) fn format_millis(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown time".to_string())
}

/// Summary followed by a numbered source list
pub(crate) fn format_result(result: &ResearchResult) -> String {
    let mut out = strip_ansi_codes(&result.summary);
    if !out.ends_with('\n') {
        out.push('\n');
    }

    if !result.sources.is_empty() {
        out.push_str("\nSources:\n");
        for (idx, source) in result.sources.iter().enumerate() {
            let _ = writeln!(out, "  [{}] {}", idx + 1, strip_ansi_codes(&source.title));
            let _ = writeln!(out, "      {}", strip_ansi_codes(&source.uri));
        }
    }

    out
}

/// One line per entry: id, time, category, first line of the query
pub(crate) fn format_history_line(item: &HistoryItem) -> String {
    let query = strip_ansi_codes(item.query.lines().next().unwrap_or(""));
    format!("{}  {}  [{}] {}", item.id, format_millis(item.timestamp), item.category.tag(), query)
}

/// Header block for `history show`, followed by the full result
pub(crate) fn format_history_item(item: &HistoryItem) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Query:    {}", strip_ansi_codes(&item.query));
    let _ = writeln!(out, "Category: {} ({})", item.category.label(), item.category.tag());
    let _ = writeln!(out, "Time:     {}", format_millis(item.timestamp));
    let _ = writeln!(out, "Id:       {}", item.id);
    out.push('\n');
    out.push_str(&format_result(&item.result));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResearchCategory, ResearchSource};

    fn result() -> ResearchResult {
        ResearchResult {
            summary: "\x1b[31mLoRA\x1b[0m is cheap".to_string(),
            sources: vec![ResearchSource {
                title: "LoRA paper".to_string(),
                uri: "https://arxiv.org/abs/2106.09685".to_string(),
            }],
        }
    }

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(0), "1970-01-01 00:00:00");
        assert_eq!(format_millis(1_700_000_000_000), "2023-11-14 22:13:20");
        assert_eq!(format_millis(i64::MAX), "unknown time");
    }

    #[test]
    fn test_format_result_strips_and_numbers_sources() {
        let text = format_result(&result());
        assert!(text.starts_with("LoRA is cheap\n"));
        assert!(text.contains("Sources:\n  [1] LoRA paper\n      https://arxiv.org/abs/2106.09685\n"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_format_result_without_sources() {
        let text = format_result(&ResearchResult { summary: "plain\n".to_string(), sources: vec![] });
        assert_eq!(text, "plain\n");
    }

    #[test]
    fn test_history_line_uses_first_query_line() {
        let item = HistoryItem::new("42", "line one\nline two", ResearchCategory::Arxiv, result(), 0);
        assert_eq!(format_history_line(&item), "42  1970-01-01 00:00:00  [arxiv] line one");
    }

    #[test]
    fn test_history_item_block() {
        let item = HistoryItem::new("42", "LoRA", ResearchCategory::Github, result(), 0);
        let text = format_history_item(&item);
        assert!(text.contains("Query:    LoRA\n"));
        assert!(text.contains("Category: Repo Analysis (github)\n"));
        assert!(text.contains("Id:       42\n"));
        assert!(text.contains("[1] LoRA paper"));
    }
}
