//! Keyword extraction for vocabulary comparison

use crate::patterns::{is_stopword, NUMERIC_TOKEN, WORD_PATTERN};
use shared_types::KeywordSet;

/// Extract the normalised keyword set of a text.
///
/// Tokens are lower-cased runs of word characters. Stopwords and tokens made
/// only of decimal digits are dropped. No stemming is applied.
pub fn extract_keywords(text: &str) -> KeywordSet {
    let text_lower = text.to_lowercase();

    WORD_PATTERN
        .find_iter(&text_lower)
        .map(|m| m.as_str())
        .filter(|token| !is_stopword(token) && !NUMERIC_TOKEN.is_match(token))
        .map(str::to_string)
        .collect()
}

/// Join a keyword set back into a space-separated text
pub fn keywords_as_text(keywords: &KeywordSet) -> String {
    keywords.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
}
