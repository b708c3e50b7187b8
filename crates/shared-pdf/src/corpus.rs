//! Reference corpus backed by a PDF on disk

use crate::extract::extract_pages;
use section_engine::{ReferenceCorpus, SectionError};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default file name of the Bare Acts compilation
pub const DEFAULT_REFERENCE_PDF: &str = "Chronological Order_BARE ACTS.pdf";

/// The Bare Acts compilation, read from a fixed PDF path
#[derive(Debug, Clone)]
pub struct PdfReferenceCorpus {
    path: PathBuf,
}

impl PdfReferenceCorpus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReferenceCorpus for PdfReferenceCorpus {
    fn load(&self) -> Result<String, SectionError> {
        if !self.path.exists() {
            warn!("Reference corpus missing at {}", self.path.display());
            return Err(SectionError::ResourceUnavailable(format!(
                "Bare Acts PDF not found: {}",
                self.path.display()
            )));
        }

        let bytes = std::fs::read(&self.path).map_err(|e| {
            SectionError::ResourceUnavailable(format!(
                "Error reading Bare Acts PDF {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let pages = extract_pages(&bytes).map_err(|e| {
            SectionError::ResourceUnavailable(format!("Error reading Bare Acts PDF: {}", e))
        })?;

        info!(
            "Loaded reference corpus {} ({} pages)",
            self.path.display(),
            pages.page_count()
        );

        // Pages are concatenated without a separator
        Ok(pages.pages().concat())
    }
}
