//! Application state controller.
//!
//! [`ResearchController`] is the single coordination point between user input,
//! the result fetcher and the history store. Every front end (the TUI and the
//! one-shot CLI commands) drives the same controller.
//!
//! A search moves `idle -> loading -> idle`. The request itself is the only
//! suspension point, so the cycle is split in two halves:
//!
//! - [`ResearchController::begin_submit`] validates the query, raises the loading
//!   flag and returns a [`PendingSearch`] snapshot of what to send
//! - [`ResearchController::finish_submit`] applies the outcome and always lowers
//!   the loading flag
//!
//! The TUI runs the request between the two halves on a background task;
//! [`ResearchController::submit`] simply awaits it in place.
//!
//! While a request is in flight further submissions are rejected with
//! [`SubmitError::Busy`] rather than queued or run in parallel.

use crate::client::ResearchClient;
use crate::error::{ResearchError, SearchError, SubmitError};
use crate::models::{HistoryItem, ResearchCategory, ResearchResult};
use crate::storage::HistoryStore;

/// Shown to the user for any failed search; details go to the log
pub const SEARCH_FAILED_MESSAGE: &str = "An error occurred during research. Please try again.";

/// Starter queries offered on the start screen
pub const SUGGESTIONS: [&str; 4] =
    ["Next-gen LLM Architectures", "Stable Diffusion Video", "Efficient LoRA", "Agent Frameworks"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// User-facing notification raised by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }
}

/// Lowers the loading flag when dropped, so a cancelled [`ResearchController::submit`]
/// future cannot leave the controller stuck in the loading state
struct LoadingReset<'a>(&'a mut bool);

impl Drop for LoadingReset<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// What an in-flight search was started with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub query: String,
    pub category: ResearchCategory,
}

pub struct ResearchController {
    client: ResearchClient,
    history: HistoryStore,
    query: String,
    active_category: ResearchCategory,
    loading: bool,
    result: Option<ResearchResult>,
    notice: Option<Notice>,
}

impl ResearchController {
    pub fn new(client: ResearchClient, history: HistoryStore) -> Self {
        Self {
            client,
            history,
            query: String::new(),
            active_category: ResearchCategory::default(),
            loading: false,
            result: None,
            notice: None,
        }
    }

    pub fn client(&self) -> &ResearchClient {
        &self.client
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_query_char(&mut self) -> Option<char> {
        self.query.pop()
    }

    pub fn active_category(&self) -> ResearchCategory {
        self.active_category
    }

    /// Only the next submission is affected; history and in-flight requests keep theirs
    pub fn select_category(&mut self, category: ResearchCategory) {
        self.active_category = category;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&ResearchResult> {
        self.result.as_ref()
    }

    pub fn history(&self) -> &[HistoryItem] {
        self.history.items()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn suggestions(&self) -> &'static [&'static str] {
        &SUGGESTIONS
    }

    /// Start a search.
    ///
    /// A non-empty `override_query` replaces the current query text for this
    /// request only; `override_category` likewise. The query must be non-empty
    /// after trimming.
    pub fn begin_submit(
        &mut self,
        override_query: Option<&str>,
        override_category: Option<ResearchCategory>,
    ) -> Result<PendingSearch, SubmitError> {
        if self.loading {
            tracing::debug!("Submission rejected, request already in flight");
            return Err(SubmitError::Busy);
        }

        let query = override_query.filter(|q| !q.is_empty()).unwrap_or(&self.query);
        if query.trim().is_empty() {
            return Err(SubmitError::EmptyQuery);
        }

        let pending = PendingSearch {
            query: query.to_string(),
            category: override_category.unwrap_or(self.active_category),
        };

        self.loading = true;
        self.notice = None;
        tracing::info!(category = %pending.category, "Search started");

        Ok(pending)
    }

    /// Apply the outcome of a search started with [`Self::begin_submit`].
    ///
    /// On success the result is displayed and recorded in history. On failure a
    /// generic notice is raised. The loading flag is cleared either way.
    pub fn finish_submit(
        &mut self,
        pending: PendingSearch,
        outcome: Result<ResearchResult, ResearchError>,
    ) -> Result<(), ResearchError> {
        self.loading = false;

        match outcome {
            Ok(result) => {
                self.result = Some(result.clone());
                if let Err(e) = self.history.record(&pending.query, pending.category, result) {
                    tracing::warn!(error = %format!("{:#}", e), "Search succeeded but history was not saved");
                    self.notice = Some(Notice::error("Result shown, but history could not be saved."));
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!(query = %pending.query, error = %e, "Search failed");
                self.notice = Some(Notice::error(SEARCH_FAILED_MESSAGE));
                Err(e)
            }
        }
    }

    /// Run a full search cycle in place.
    ///
    /// Dropping the future mid-request (a timeout, a losing `select!` branch)
    /// discards the request and leaves the controller idle.
    pub async fn submit(
        &mut self,
        override_query: Option<&str>,
        override_category: Option<ResearchCategory>,
    ) -> Result<(), SearchError> {
        let pending = self.begin_submit(override_query, override_category)?;
        let client = self.client.clone();

        let reset = LoadingReset(&mut self.loading);
        let outcome = client.conduct_research(&pending.query, pending.category).await;
        drop(reset);

        self.finish_submit(pending, outcome)?;
        Ok(())
    }

    /// Show a stored snapshot without re-fetching. Returns false for an unknown id.
    pub fn select_history(&mut self, id: &str) -> bool {
        let Some(item) = self.history.get(id) else {
            return false;
        };

        self.result = Some(item.result.clone());
        self.query = item.query.clone();
        self.active_category = item.category;
        true
    }

    /// Returns whether an entry with `id` existed. A failed write still
    /// removes it for this session and raises an error notice.
    pub fn delete_history(&mut self, id: &str) -> bool {
        let existed = self.history.get(id).is_some();
        if let Err(e) = self.history.remove(id) {
            tracing::warn!(error = %format!("{:#}", e), "Failed to persist history deletion");
            self.notice = Some(Notice::error("History could not be saved."));
        }
        existed
    }

    /// Drop all history. Callers confirm with the user first.
    pub fn clear_history(&mut self) {
        match self.history.clear() {
            Ok(()) => self.notice = Some(Notice::info("History cleared")),
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "Failed to persist cleared history");
                self.notice = Some(Notice::error("History could not be saved."));
            }
        }
    }

    /// Back to the start screen
    pub fn reset(&mut self) {
        self.result = None;
        self.query.clear();
        self.active_category = ResearchCategory::General;
    }

    /// Add a suggestion to the query, or replace the query with it when the
    /// query is empty or already contains it
    pub fn apply_suggestion(&mut self, suggestion: &str) {
        if !self.query.is_empty() && !self.query.contains(suggestion) {
            self.query = format!("{} {}", self.query, suggestion);
        } else {
            self.query = suggestion.to_string();
        }
    }
}
