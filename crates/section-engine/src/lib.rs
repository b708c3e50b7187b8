//! Section extraction for statutory texts
//!
//! Finds numbered section headings in PDF-extracted text, resolves a heading
//! to its body, and compares document vocabulary against a reference corpus.
//! Everything here is pure and synchronous; PDF parsing and corpus loading
//! live with the callers.

pub mod analysis;
pub mod compare;
pub mod error;
pub mod index;
pub mod keywords;
pub mod markup;
pub mod normalize;
pub mod patterns;
pub mod resolver;

pub use analysis::{DocumentAnalysis, NO_SECTIONS_WARNING};
pub use compare::{
    common_keywords, compare_with_reference, intersect_keywords, ReferenceCorpus, TextCorpus,
};
pub use error::SectionError;
pub use index::{build_heading_index, build_heading_index_for_pages, HeadingScope};
pub use keywords::{extract_keywords, keywords_as_text};
pub use markup::{highlight_keyword, strip_markup};
pub use normalize::normalize_extracted_text;
pub use resolver::{heading_signature, resolve_section, resolve_section_with, BoundaryPolicy};

use shared_types::{PageText, SectionBody};

/// SectionEngine entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionEngine {
    scope: HeadingScope,
    boundary: BoundaryPolicy,
}

impl SectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict which pages contribute heading candidates
    pub fn with_scope(mut self, scope: HeadingScope) -> Self {
        self.scope = scope;
        self
    }

    /// Choose how section bodies are terminated
    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn analyze(&self, pages: &PageText) -> DocumentAnalysis {
        DocumentAnalysis::from_pages(pages, self.scope)
    }

    pub fn resolve(&self, full_text: &str, heading_title: &str) -> Result<SectionBody, SectionError> {
        resolve_section_with(full_text, heading_title, self.boundary)
    }
}
