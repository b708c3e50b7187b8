//! Coarse section heading index
//!
//! Every numbered line ("7. Power to make rules") becomes a heading candidate.
//! The pass over-selects on purpose; the resolver re-scans with the stricter
//! em-dash anchored pattern when a heading is looked up.

use crate::patterns::COARSE_HEADING_PATTERN;
use serde::{Deserialize, Serialize};
use shared_types::{HeadingCandidate, PageText};

/// Which pages contribute heading candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "pages")]
pub enum HeadingScope {
    #[default]
    AllPages,
    /// Only the first `n` pages, where acts carry their arrangement of sections
    LeadingPages(usize),
}

impl HeadingScope {
    fn includes(&self, page: usize) -> bool {
        match self {
            HeadingScope::AllPages => true,
            HeadingScope::LeadingPages(n) => page < *n,
        }
    }
}

/// Build the heading index of a concatenated document text.
///
/// Candidates come back in document order. Identical headings are kept.
pub fn build_heading_index(full_text: &str) -> Vec<HeadingCandidate> {
    COARSE_HEADING_PATTERN
        .captures_iter(full_text)
        .filter_map(|cap| cap.get(1))
        .map(|m| HeadingCandidate {
            raw_match: m.as_str().to_string(),
            start_offset: m.start(),
            end_offset: m.end(),
            page: 0,
        })
        .collect()
}

/// Build the heading index of a paged document, restricted to `scope`.
///
/// Offsets point into [`PageText::full_text`].
pub fn build_heading_index_for_pages(pages: &PageText, scope: HeadingScope) -> Vec<HeadingCandidate> {
    let full_text = pages.full_text();

    build_heading_index(&full_text)
        .into_iter()
        .filter_map(|mut candidate| {
            let page = pages.page_at_offset(candidate.start_offset)?;
            candidate.page = page;
            scope.includes(page).then_some(candidate)
        })
        .collect()
}
