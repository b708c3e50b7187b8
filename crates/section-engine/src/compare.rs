//! Vocabulary comparison against a reference corpus

use crate::error::SectionError;
use crate::keywords::extract_keywords;
use shared_types::KeywordSet;

/// Source of the reference corpus text (the Bare Acts compilation)
pub trait ReferenceCorpus {
    /// Load the full reference text.
    ///
    /// Implementations report a missing or unreadable source as
    /// [`SectionError::ResourceUnavailable`].
    fn load(&self) -> Result<String, SectionError>;
}

/// Reference corpus already held in memory
#[derive(Debug, Clone)]
pub struct TextCorpus(pub String);

impl ReferenceCorpus for TextCorpus {
    fn load(&self) -> Result<String, SectionError> {
        Ok(self.0.clone())
    }
}

/// Keywords shared by two texts
pub fn common_keywords(document_text: &str, reference_text: &str) -> KeywordSet {
    intersect_keywords(document_text, &extract_keywords(reference_text))
}

/// Keywords of `document_text` that also appear in a precomputed reference set
pub fn intersect_keywords(document_text: &str, reference: &KeywordSet) -> KeywordSet {
    extract_keywords(document_text)
        .intersection(reference)
        .cloned()
        .collect()
}

/// Compare a document against the reference corpus, loading it first
pub fn compare_with_reference(
    document_text: &str,
    corpus: &dyn ReferenceCorpus,
) -> Result<KeywordSet, SectionError> {
    let reference_text = corpus.load()?;
    Ok(common_keywords(document_text, &reference_text))
}
