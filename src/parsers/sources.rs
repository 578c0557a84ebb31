use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::ResearchSource;

/// Inline markdown link with an absolute http(s) target: `[label](http://...)`
fn link_pattern() -> &'static Regex {
    static LINK: OnceLock<Regex> = OnceLock::new();
    LINK.get_or_init(|| {
        Regex::new(r"\[([^\]]+)\]\((https?://[^)]+)\)").expect("link pattern is valid")
    })
}

/// Extract every `[label](url)` link from markdown text.
///
/// Best-effort scan: reference-style links, autolinks and relative targets are
/// ignored. The first occurrence of each url wins; later links to the same url
/// are dropped whatever their label. Order follows first appearance.
///
/// # Examples
///
/// ```
/// use tech_researcher::parsers::sources::extract_sources;
///
/// let text = "See [PaperA](https://x.org/a) and [PaperA again](https://x.org/a)";
/// let sources = extract_sources(text);
/// assert_eq!(sources.len(), 1);
/// assert_eq!(sources[0].title, "PaperA");
/// ```
pub fn extract_sources(markdown: &str) -> Vec<ResearchSource> {
    let mut seen = HashSet::new();
    let mut sources = Vec::new();

    for caps in link_pattern().captures_iter(markdown) {
        let uri = &caps[2];
        if !seen.insert(uri.to_string()) {
            continue;
        }
        sources.push(ResearchSource { title: caps[1].to_string(), uri: uri.to_string() });
    }

    sources
}
