/// HTTP round trips against an in-process backend
///
/// These tests run the real reqwest transport against an axum server bound to
/// a random loopback port.
mod common;

use std::sync::Arc;
use std::time::Duration;

use common::MockBackend;
use serde_json::json;
use tech_researcher::client::NO_RESULT_FALLBACK;
use tech_researcher::{HttpBackend, ResearchCategory, ResearchClient, ResearchError};

fn client_for(backend: &MockBackend) -> ResearchClient {
    let http = HttpBackend::new(backend.url(), Some(Duration::from_secs(10))).unwrap();
    ResearchClient::new(Arc::new(http))
}

#[test]
fn test_research_returns_summary_and_sources() {
    let backend = MockBackend::with_result(
        "See [PaperA](https://a.org) and [RepoB](http://b.com) and [PaperA](https://a.org).",
    );
    let client = client_for(&backend);

    let result = backend
        .block_on(client.conduct_research("LoRA", ResearchCategory::General))
        .unwrap();

    assert!(result.summary.starts_with("See [PaperA]"));
    assert_eq!(result.sources.len(), 2);
    assert_eq!(result.sources[0].title, "PaperA");
    assert_eq!(result.sources[0].uri, "https://a.org");
    assert_eq!(result.sources[1].title, "RepoB");
    assert_eq!(result.sources[1].uri, "http://b.com");
}

#[test]
fn test_category_prefix_reaches_backend() {
    let backend = MockBackend::with_result("ok");
    let client = client_for(&backend);

    backend.block_on(client.conduct_research("LoRA", ResearchCategory::Github)).unwrap();

    assert_eq!(backend.requests(), vec![json!({ "query": "[github] LoRA" })]);
}

#[test]
fn test_general_category_sends_query_unchanged() {
    let backend = MockBackend::with_result("ok");
    let client = client_for(&backend);

    backend
        .block_on(client.conduct_research("diffusion video", ResearchCategory::General))
        .unwrap();

    assert_eq!(backend.requests(), vec![json!({ "query": "diffusion video" })]);
}

#[test]
fn test_missing_result_uses_fallback() {
    let backend = MockBackend::start(200, "{}");
    let client = client_for(&backend);

    let result = backend
        .block_on(client.conduct_research("anything", ResearchCategory::Models))
        .unwrap();

    assert_eq!(result.summary, NO_RESULT_FALLBACK);
    assert!(result.sources.is_empty());
}

#[test]
fn test_empty_result_uses_fallback() {
    let backend = MockBackend::with_result("");
    let client = client_for(&backend);

    let result = backend
        .block_on(client.conduct_research("anything", ResearchCategory::Arxiv))
        .unwrap();

    assert_eq!(result.summary, NO_RESULT_FALLBACK);
}

#[test]
fn test_server_error_carries_status_and_body() {
    let backend = MockBackend::start(500, r#"{"detail":"agent crashed"}"#);
    let client = client_for(&backend);

    let err = backend
        .block_on(client.conduct_research("LoRA", ResearchCategory::General))
        .unwrap_err();

    match err {
        ResearchError::RequestFailed { message } => {
            assert!(message.contains("500"), "message: {}", message);
            assert!(message.contains("agent crashed"), "message: {}", message);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_non_json_success_is_request_failed() {
    let backend = MockBackend::start(200, "<html>proxy login</html>");
    let client = client_for(&backend);

    let err = backend
        .block_on(client.conduct_research("LoRA", ResearchCategory::General))
        .unwrap_err();

    assert!(matches!(err, ResearchError::RequestFailed { .. }));
}

#[test]
fn test_empty_query_never_reaches_backend() {
    let backend = MockBackend::with_result("ok");
    let client = client_for(&backend);

    let err = backend
        .block_on(client.conduct_research("   ", ResearchCategory::Github))
        .unwrap_err();

    assert_eq!(err, ResearchError::EmptyQuery);
    assert!(backend.requests().is_empty());
}
