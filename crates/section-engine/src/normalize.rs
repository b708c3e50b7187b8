//! Clean-up of raw extracted page text
//!
//! Applied to each page as it comes out of the PDF layer so that headings use
//! one dash form and one line ending. The resolver itself matches literally.

/// Normalise line endings, dash variants and invisible characters
pub fn normalize_extracted_text(page: &str) -> String {
    let unified = page.replace("\r\n", "\n");
    let mut out = String::with_capacity(unified.len());

    for c in unified.chars() {
        match c {
            '\r' => out.push('\n'),
            // HORIZONTAL BAR and TWO-EM DASH are extracted in place of em-dashes
            '\u{2015}' | '\u{2E3A}' => out.push('—'),
            '\u{00A0}' => out.push(' '),
            '\u{00AD}' => {}
            _ => out.push(c),
        }
    }

    out
}
