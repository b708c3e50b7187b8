//! Markup clean-up and keyword highlighting for section bodies

use regex::{Captures, RegexBuilder};
use scraper::Html;

/// Strip tags and decode entities, putting each text node on its own line.
///
/// Plain text without tags comes back unchanged apart from whitespace.
pub fn strip_markup(text: &str) -> String {
    let fragment = Html::parse_fragment(text);
    fragment
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap every case-insensitive occurrence of `keyword` in a `<mark>` tag.
///
/// Matched text keeps its original casing.
pub fn highlight_keyword(text: &str, keyword: &str) -> String {
    if keyword.is_empty() {
        return text.to_string();
    }

    let pattern = match RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(_) => return text.to_string(),
    };

    pattern
        .replace_all(text, |caps: &Captures| {
            format!(
                r#"<mark style="background-color: orange">{}</mark>"#,
                &caps[0]
            )
        })
        .into_owned()
}
