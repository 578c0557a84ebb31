//! Result fetcher: sends research queries to the backend and structures the reply.
//!
//! The backend is an opaque HTTP endpoint taking `{"query": "..."}` and answering
//! `{"result": "<markdown>"}`. [`ResearchClient`] owns the query annotation and
//! source extraction; the transport sits behind the [`ResearchBackend`] trait so
//! tests can swap in a fake.

pub mod backend;
pub mod fetcher;

pub use backend::{HttpBackend, ResearchBackend};
pub use fetcher::ResearchClient;

/// Default endpoint of the local research backend
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/research";

/// Summary used when the backend answers successfully but with no result text
pub const NO_RESULT_FALLBACK: &str = "No result returned.";
