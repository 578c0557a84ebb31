use std::sync::Arc;

use super::backend::ResearchBackend;
use crate::error::ResearchError;
use crate::models::{ResearchCategory, ResearchResult};
use crate::parsers::extract_sources;

/// Issues research queries and turns the markdown reply into a [`ResearchResult`]
#[derive(Clone)]
pub struct ResearchClient {
    backend: Arc<dyn ResearchBackend>,
}

impl ResearchClient {
    pub fn new(backend: Arc<dyn ResearchBackend>) -> Self {
        Self { backend }
    }

    /// Run one research query.
    ///
    /// The query must be non-empty after trimming. It is annotated with the category
    /// marker (`[github] ...`) unless the category is `General`, and sent as-is.
    /// The summary is returned untouched; sources are extracted from it.
    pub async fn conduct_research(
        &self,
        query: &str,
        category: ResearchCategory,
    ) -> Result<ResearchResult, ResearchError> {
        if query.trim().is_empty() {
            return Err(ResearchError::EmptyQuery);
        }

        let full_query = category.annotate(query);
        tracing::debug!(%category, query = %full_query, "Sending research request");

        let summary = self.backend.research(&full_query).await.inspect_err(|e| {
            tracing::error!(%category, error = %e, "Research request failed");
        })?;

        let sources = extract_sources(&summary);
        tracing::info!(%category, sources = sources.len(), "Research completed");

        Ok(ResearchResult { summary, sources })
    }
}
