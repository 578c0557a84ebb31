//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::{StatusCode, header};
use axum::routing::post;
use serde_json::Value;
use tech_researcher::{HistoryItem, ResearchCategory, ResearchResult, ResearchSource};
use tempfile::TempDir;
use tokio::runtime::Runtime;

pub const RESEARCH_PATH: &str = "/api/research";

/// In-process research backend answering every request with a canned response.
///
/// The server runs on its own runtime and stops when this value is dropped.
/// Tests drive async client code through [`MockBackend::block_on`].
pub struct MockBackend {
    url: String,
    requests: Arc<Mutex<Vec<Value>>>,
    runtime: Runtime,
}

impl MockBackend {
    /// Backend answering `status` with a raw body
    pub fn start(status: u16, body: impl Into<String>) -> Self {
        let runtime = Runtime::new().expect("Failed to start test runtime");
        let status = StatusCode::from_u16(status).expect("Invalid status code");
        let body: String = body.into();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        let app = Router::new().route(
            RESEARCH_PATH,
            post(move |axum::Json(payload): axum::Json<Value>| {
                let recorded = recorded.clone();
                let body = body.clone();
                async move {
                    recorded.lock().unwrap().push(payload);
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                }
            }),
        );

        let addr: SocketAddr = runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.expect("axum serve");
            });
            addr
        });

        Self { url: format!("http://{}{}", addr, RESEARCH_PATH), requests, runtime }
    }

    /// Backend answering 200 with `{"result": <result>}`
    pub fn with_result(result: &str) -> Self {
        Self::start(200, serde_json::json!({ "result": result }).to_string())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// JSON bodies received so far, oldest first
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Temporary data directory for a `FileStore` or the CLI's `--data-dir`
pub fn temp_data_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Write a raw history blob where `FileStore` will look for it
pub fn write_history_blob(data_dir: &Path, blob: &str) {
    std::fs::create_dir_all(data_dir).expect("Failed to create data dir");
    std::fs::write(data_dir.join("research_history.json"), blob)
        .expect("Failed to write history blob");
}

/// Builder for persisted history entries
pub struct HistoryItemBuilder {
    id: String,
    query: String,
    category: ResearchCategory,
    summary: String,
    sources: Vec<ResearchSource>,
    timestamp: i64,
}

impl HistoryItemBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            query: format!("query {}", id),
            category: ResearchCategory::General,
            summary: "Summary".to_string(),
            sources: Vec::new(),
            timestamp: id.parse().unwrap_or(1_700_000_000_000),
        }
    }

    pub fn query(mut self, query: &str) -> Self {
        self.query = query.to_string();
        self
    }

    pub fn category(mut self, category: ResearchCategory) -> Self {
        self.category = category;
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = summary.to_string();
        self
    }

    pub fn source(mut self, title: &str, uri: &str) -> Self {
        self.sources.push(ResearchSource { title: title.to_string(), uri: uri.to_string() });
        self
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn build(self) -> HistoryItem {
        HistoryItem::new(
            self.id,
            self.query,
            self.category,
            ResearchResult { summary: self.summary, sources: self.sources },
            self.timestamp,
        )
    }
}

/// Serialize entries the way the history store persists them
pub fn history_blob(items: &[HistoryItem]) -> String {
    serde_json::to_string(items).expect("Failed to serialize history")
}
