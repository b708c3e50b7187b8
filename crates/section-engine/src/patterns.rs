//! Regex patterns and word lists shared by the extraction passes

use lazy_static::lazy_static;
use regex::Regex;

/// Separator between a statutory heading and its body
pub const HEADING_TERMINATOR: char = '—';

/// Function words dropped from keyword sets
pub const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

lazy_static! {
    /// Runs of word characters
    pub static ref WORD_PATTERN: Regex = Regex::new(r"\w+").unwrap();

    /// Tokens made only of decimal digits; letter numerals such as "ⅳ" are words
    pub static ref NUMERIC_TOKEN: Regex = Regex::new(r"^\d+$").unwrap();

    /// Coarse heading pass: any numbered line, e.g. "12. Power to make rules"
    pub static ref COARSE_HEADING_PATTERN: Regex =
        Regex::new(r"(?m)^[ \t]*(\d+\.\s+[^\n]+)").unwrap();

    /// Strict heading pass: numbered heading or "Short title" heading closed by an em-dash
    pub static ref STRICT_HEADING_PATTERN: Regex =
        Regex::new(r"\b\d+\.\s+[^\d]+\s*—|\bShort title\.\s+[^\n]+\.—").unwrap();

    /// Next section marker: a one or two digit number followed by a period
    pub static ref SHORT_NUMERAL_PATTERN: Regex = Regex::new(r"\b\d{1,2}\.").unwrap();
}

/// Check whether a lower-cased token is a stopword
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}
