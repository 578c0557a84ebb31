use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Domain a research query is aimed at. Only ever communicated to the backend
/// as a `[tag]` prefix on the query text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResearchCategory {
    Arxiv,
    Github,
    Models,
    #[default]
    General,
}

impl ResearchCategory {
    pub const ALL: [ResearchCategory; 4] = [Self::Arxiv, Self::Github, Self::Models, Self::General];

    /// Lowercase tag used on the wire and in persisted history
    pub fn tag(self) -> &'static str {
        match self {
            Self::Arxiv => "arxiv",
            Self::Github => "github",
            Self::Models => "models",
            Self::General => "general",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Arxiv => "arXiv Synthesis",
            Self::Github => "Repo Analysis",
            Self::Models => "Model Discovery",
            Self::General => "General",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Arxiv => "Scans recent papers and picks the most relevant and influential ones.",
            Self::Github => "Lists implementation details and the most starred GitHub projects.",
            Self::Models => "Reports state-of-the-art HuggingFace models and Spaces demos.",
            Self::General => "Open-ended research across every source.",
        }
    }

    /// Next category in display order, wrapping around
    pub fn next(self) -> Self {
        match self {
            Self::Arxiv => Self::Github,
            Self::Github => Self::Models,
            Self::Models => Self::General,
            Self::General => Self::Arxiv,
        }
    }

    /// Apply the category marker to a query. `General` leaves the query untouched.
    pub fn annotate(self, query: &str) -> String {
        match self {
            Self::General => query.to_string(),
            other => format!("[{}] {}", other.tag(), query),
        }
    }
}

impl fmt::Display for ResearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ResearchCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arxiv" => Ok(Self::Arxiv),
            "github" => Ok(Self::Github),
            "models" => Ok(Self::Models),
            "general" => Ok(Self::General),
            other => Err(format!(
                "unknown category '{}' (expected one of: arxiv, github, models, general)",
                other
            )),
        }
    }
}

/// A `{title, uri}` pair pulled out of markdown link syntax in a summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchSource {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchResult {
    /// Raw markdown as returned by the backend
    pub summary: String,
    /// Unique by `uri`, in first-seen order
    #[serde(default)]
    pub sources: Vec<ResearchSource>,
}
