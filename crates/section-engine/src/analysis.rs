//! Per-document analysis: full text plus heading index

use crate::error::SectionError;
use crate::index::{build_heading_index_for_pages, HeadingScope};
use serde::{Deserialize, Serialize};
use shared_types::{HeadingCandidate, PageText};

/// Warning attached when a document yields nothing to index
pub const NO_SECTIONS_WARNING: &str = "no sections found";

/// Result of analysing one extracted document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub page_count: usize,
    pub full_text: String,
    pub headings: Vec<HeadingCandidate>,
    pub warnings: Vec<String>,
}

impl DocumentAnalysis {
    /// Analyse extracted pages.
    ///
    /// Empty or blank documents are not an error: they produce an empty
    /// heading list and a warning.
    pub fn from_pages(pages: &PageText, scope: HeadingScope) -> Self {
        let mut warnings = Vec::new();

        if let Err(err) = validate_pages(pages) {
            warnings.push(format!("{}: {}", NO_SECTIONS_WARNING, err));
            return Self {
                page_count: pages.page_count(),
                full_text: pages.full_text(),
                headings: Vec::new(),
                warnings,
            };
        }

        let headings = build_heading_index_for_pages(pages, scope);
        if headings.is_empty() {
            warnings.push(NO_SECTIONS_WARNING.to_string());
        }

        Self {
            page_count: pages.page_count(),
            full_text: pages.full_text(),
            headings,
            warnings,
        }
    }
}

/// Reject documents with no pages or no text at all
pub fn validate_pages(pages: &PageText) -> Result<(), SectionError> {
    if pages.page_count() == 0 {
        return Err(SectionError::MalformedInput(
            "document has no pages".to_string(),
        ));
    }
    if pages.is_blank() {
        return Err(SectionError::MalformedInput(format!(
            "no text extracted from {} page(s)",
            pages.page_count()
        )));
    }
    Ok(())
}
