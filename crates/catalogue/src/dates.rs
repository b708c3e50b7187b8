//! Enactment date parsing

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Ordinal suffix directly after a day number: "1st", "22nd", "3rd", "4th"
    static ref ORDINAL_SUFFIX: Regex = Regex::new(r"(\d)(?:st|nd|rd|th)\b").unwrap();
}

/// Parse a bracketed act date such as `[1st March, 1950]`.
///
/// Returns `None` when the value is not a `day Month, year` date.
pub fn parse_act_date(raw: &str) -> Option<NaiveDate> {
    let inner = raw
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim();
    let cleaned = ORDINAL_SUFFIX.replace_all(inner, "${1}");
    NaiveDate::parse_from_str(&cleaned, "%d %B, %Y").ok()
}
