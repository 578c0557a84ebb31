use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::NO_RESULT_FALLBACK;
use crate::error::ResearchError;

/// Transport to the research backend: one annotated query in, markdown out
#[async_trait]
pub trait ResearchBackend: Send + Sync {
    async fn research(&self, query: &str) -> Result<String, ResearchError>;
}

#[derive(Debug, Serialize)]
struct ResearchRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResearchResponse {
    #[serde(default)]
    result: Option<String>,
}

/// reqwest-backed transport: `POST {endpoint}` with a JSON body
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBackend {
    /// Build a backend for `endpoint`. No timeout is applied unless one is given.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client, endpoint: endpoint.into() })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ResearchBackend for HttpBackend {
    async fn research(&self, query: &str) -> Result<String, ResearchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ResearchRequest { query })
            .send()
            .await
            .map_err(|e| ResearchError::request_failed(format!("Backend unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            // Body is diagnostic only; an unreadable body must not hide the status
            let body = response.text().await.unwrap_or_default();
            return Err(ResearchError::request_failed(format!(
                "Backend error ({}): {}",
                status.as_u16(),
                body
            )));
        }

        let payload: ResearchResponse = response.json().await.map_err(|e| {
            ResearchError::request_failed(format!("Invalid backend response: {}", e))
        })?;

        Ok(payload
            .result
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NO_RESULT_FALLBACK.to_string()))
    }
}
