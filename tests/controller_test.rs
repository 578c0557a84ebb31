/// End-to-end tests: controller -> HTTP backend -> file-backed history
mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{MockBackend, temp_data_dir};
use serde_json::json;
use tech_researcher::controller::{NoticeKind, SEARCH_FAILED_MESSAGE};
use tech_researcher::{
    FileStore, HistoryStore, HttpBackend, ResearchCategory, ResearchClient, ResearchController,
    SearchError, SubmitError,
};

fn controller(backend: &MockBackend, data_dir: &std::path::Path) -> ResearchController {
    let http = HttpBackend::new(backend.url(), Some(Duration::from_secs(10))).unwrap();
    let history = HistoryStore::open(Arc::new(FileStore::new(data_dir)));
    ResearchController::new(ResearchClient::new(Arc::new(http)), history)
}

#[test]
fn test_e2e_search_displays_and_records() {
    let backend = MockBackend::with_result("Top repo: [peft](https://github.com/huggingface/peft)");
    let dir = temp_data_dir();
    let mut controller = controller(&backend, dir.path());

    controller.select_category(ResearchCategory::Github);
    controller.set_query("LoRA");
    backend.block_on(controller.submit(None, None)).unwrap();

    assert_eq!(backend.requests(), vec![json!({ "query": "[github] LoRA" })]);
    assert!(!controller.is_loading());

    let result = controller.result().unwrap();
    assert_eq!(result.sources.len(), 1);
    assert_eq!(result.sources[0].uri, "https://github.com/huggingface/peft");

    // History stores the raw query and the category separately
    let reopened = HistoryStore::open(Arc::new(FileStore::new(dir.path())));
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.items()[0].query, "LoRA");
    assert_eq!(reopened.items()[0].category, ResearchCategory::Github);
    assert_eq!(&reopened.items()[0].result, result);
}

#[test]
fn test_e2e_override_query_and_category() {
    let backend = MockBackend::with_result("ok");
    let dir = temp_data_dir();
    let mut controller = controller(&backend, dir.path());

    controller.set_query("typed text");
    backend
        .block_on(controller.submit(Some("Agent Frameworks"), Some(ResearchCategory::Models)))
        .unwrap();

    assert_eq!(backend.requests(), vec![json!({ "query": "[models] Agent Frameworks" })]);
    assert_eq!(controller.history()[0].query, "Agent Frameworks");
    // The active category is not changed by a one-off override
    assert_eq!(controller.active_category(), ResearchCategory::General);
}

#[test]
fn test_e2e_backend_failure_leaves_history_untouched() {
    let backend = MockBackend::start(503, "overloaded");
    let dir = temp_data_dir();
    let mut controller = controller(&backend, dir.path());

    controller.set_query("LoRA");
    let err = backend.block_on(controller.submit(None, None)).unwrap_err();

    assert!(matches!(err, SearchError::Failed(_)));
    assert!(!controller.is_loading());
    assert!(controller.result().is_none());
    assert!(controller.history().is_empty());

    let notice = controller.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, SEARCH_FAILED_MESSAGE);

    assert!(HistoryStore::open(Arc::new(FileStore::new(dir.path()))).is_empty());
}

#[test]
fn test_e2e_empty_query_is_rejected_without_request() {
    let backend = MockBackend::with_result("ok");
    let dir = temp_data_dir();
    let mut controller = controller(&backend, dir.path());

    controller.set_query("   ");
    let err = backend.block_on(controller.submit(None, None)).unwrap_err();

    assert_eq!(err, SearchError::Rejected(SubmitError::EmptyQuery));
    assert!(backend.requests().is_empty());
    assert!(!controller.is_loading());
}

#[test]
fn test_e2e_history_selection_after_restart() {
    let backend = MockBackend::with_result("Cached [Paper](https://arxiv.org/abs/1)");
    let dir = temp_data_dir();

    {
        let mut controller = controller(&backend, dir.path());
        controller.select_category(ResearchCategory::Arxiv);
        controller.set_query("Efficient LoRA");
        backend.block_on(controller.submit(None, None)).unwrap();
    }

    let mut controller = controller(&backend, dir.path());
    assert!(controller.result().is_none());

    let id = controller.history()[0].id.clone();
    assert!(controller.select_history(&id));
    assert_eq!(controller.query(), "Efficient LoRA");
    assert_eq!(controller.active_category(), ResearchCategory::Arxiv);
    assert_eq!(controller.result().unwrap().sources.len(), 1);

    // Selecting never re-fetches
    assert_eq!(backend.requests().len(), 1);
}

#[test]
fn test_e2e_delete_and_clear() {
    let backend = MockBackend::with_result("ok");
    let dir = temp_data_dir();
    let mut controller = controller(&backend, dir.path());

    for query in ["one", "two", "three"] {
        backend.block_on(controller.submit(Some(query), None)).unwrap();
    }
    assert_eq!(controller.history().len(), 3);

    let id = controller.history()[1].id.clone();
    assert!(controller.delete_history(&id));
    assert!(!controller.delete_history("no-such-id"));
    let remaining: Vec<&str> = controller.history().iter().map(|h| h.query.as_str()).collect();
    assert_eq!(remaining, vec!["three", "one"]);

    controller.clear_history();
    assert!(controller.history().is_empty());
    assert!(HistoryStore::open(Arc::new(FileStore::new(dir.path()))).is_empty());
}
