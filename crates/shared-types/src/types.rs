use std::collections::BTreeSet;

/// Separator appended after every page when pages are joined into one text
pub const PAGE_BREAK: &str = "\n\n";

/// Normalised, stopword-filtered token set
pub type KeywordSet = BTreeSet<String>;

/// Per-page plain text of one document, in reading order
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PageText {
    pages: Vec<String>,
}

impl PageText {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// True when there are no pages or every page is whitespace
    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|p| p.trim().is_empty())
    }

    /// Concatenate all pages, each followed by [`PAGE_BREAK`]
    pub fn full_text(&self) -> String {
        let capacity = self
            .pages
            .iter()
            .map(|p| p.len() + PAGE_BREAK.len())
            .sum();
        let mut text = String::with_capacity(capacity);
        for page in &self.pages {
            text.push_str(page);
            text.push_str(PAGE_BREAK);
        }
        text
    }

    /// Byte range of each page inside [`PageText::full_text`], separator excluded
    pub fn page_spans(&self) -> Vec<(usize, usize)> {
        let mut offset = 0;
        self.pages
            .iter()
            .map(|p| {
                let span = (offset, offset + p.len());
                offset += p.len() + PAGE_BREAK.len();
                span
            })
            .collect()
    }

    /// Index of the page owning a byte offset of the full text.
    ///
    /// Offsets that fall on a separator belong to the page before it.
    pub fn page_at_offset(&self, offset: usize) -> Option<usize> {
        self.page_spans()
            .iter()
            .position(|&(_, end)| offset < end + PAGE_BREAK.len())
    }
}

impl From<Vec<String>> for PageText {
    fn from(pages: Vec<String>) -> Self {
        Self::new(pages)
    }
}

/// A span of the full text that looks like a section heading
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HeadingCandidate {
    pub raw_match: String,
    pub start_offset: usize, // Byte offset into the full text
    pub end_offset: usize,
    pub page: usize,
}

/// Body text resolved for one heading
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SectionBody {
    pub heading: String,
    pub body_text: String,
    /// Raw body span in the full text, before markup stripping
    pub start_offset: usize,
    pub end_offset: usize,
}
