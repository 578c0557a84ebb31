//! Error types for the research client and controller

use thiserror::Error;

/// Failure of a single research request. Terminal for the triggering action:
/// there are no retries and no partial results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResearchError {
    #[error("query must not be empty")]
    EmptyQuery,

    #[error("request failed: {message}")]
    RequestFailed { message: String },
}

impl ResearchError {
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed { message: message.into() }
    }
}

/// Reasons a submission is refused before any request is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("query must not be empty")]
    EmptyQuery,

    #[error("a research request is already in flight")]
    Busy,
}

/// Outcome of a full submit cycle that did not produce a result
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error(transparent)]
    Rejected(#[from] SubmitError),

    #[error(transparent)]
    Failed(#[from] ResearchError),
}
