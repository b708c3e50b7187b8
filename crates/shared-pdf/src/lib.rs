//! Shared PDF handling utilities
//!
//! Page-by-page text extraction for uploaded documents and the PDF-backed
//! reference corpus used for vocabulary comparison.

pub mod corpus;
pub mod error;
pub mod extract;
#[cfg(any(test, feature = "test-support"))]
pub mod fixtures;

pub use corpus::{PdfReferenceCorpus, DEFAULT_REFERENCE_PDF};
pub use error::PdfError;
pub use extract::{document_hash, extract_pages};
