//! Per-page text extraction
//!
//! lopdf reads the page tree and decodes each page's text operators. When
//! that yields nothing (unusual font encodings, broken content streams) the
//! whole document is handed to pdf-extract instead.

use crate::error::PdfError;
use lopdf::Document;
use section_engine::normalize_extracted_text;
use sha2::{Digest, Sha256};
use shared_types::PageText;
use tracing::{debug, warn};

/// Page separator emitted by pdf-extract
const FORM_FEED: char = '\u{000C}';

/// Extract the text of every page, in reading order
pub fn extract_pages(bytes: &[u8]) -> Result<PageText, PdfError> {
    let doc = Document::load_mem(bytes).map_err(|e| PdfError::Parse(e.to_string()))?;

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    debug!("Extracting text from {} page(s)", page_numbers.len());

    let pages: Vec<String> = page_numbers
        .iter()
        .map(|&number| match doc.extract_text(&[number]) {
            Ok(text) => normalize_extracted_text(&text),
            Err(e) => {
                warn!("Failed to extract text from page {}: {}", number, e);
                String::new()
            }
        })
        .collect();

    let pages = PageText::new(pages);
    if pages.page_count() > 0 && pages.is_blank() {
        debug!("lopdf found no text, falling back to pdf-extract");
        if let Some(fallback) = extract_with_fallback(bytes) {
            return Ok(fallback);
        }
    }

    Ok(pages)
}


/// SHA-256 of the raw PDF bytes, hex encoded
pub fn document_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn extract_with_fallback(bytes: &[u8]) -> Option<PageText> {
    // pdf-extract panics on some malformed inputs
    let result = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

    let text = match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("pdf-extract failed: {}", e);
            return None;
        }
        Err(_) => {
            warn!("pdf-extract panicked while reading document");
            return None;
        }
    };

    let pages: Vec<String> = if text.contains(FORM_FEED) {
        text.split(FORM_FEED).map(normalize_extracted_text).collect()
    } else {
        vec![normalize_extracted_text(&text)]
    };

    let pages = PageText::new(pages);
    (!pages.is_blank()).then_some(pages)
}
