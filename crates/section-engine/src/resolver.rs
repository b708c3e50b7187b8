//! Section body lookup
//!
//! A heading title is turned into a signature (`<title>—`) and searched for
//! among the strict heading matches of the full text. The first match that
//! contains the signature wins; later sections with an identical heading
//! cannot be reached through this lookup.

use crate::error::SectionError;
use crate::markup::strip_markup;
use crate::patterns::{HEADING_TERMINATOR, SHORT_NUMERAL_PATTERN, STRICT_HEADING_PATTERN};
use serde::{Deserialize, Serialize};
use shared_types::SectionBody;

/// Where a section body stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Stop at the next one or two digit number followed by a period.
    ///
    /// Numbered cross references inside a body ("see clause 5.") cut the
    /// body short.
    #[default]
    ShortNumeral,
    /// Stop only at the next em-dash terminated heading
    StrictHeading,
}

/// Build the search signature for a heading title
pub fn heading_signature(heading_title: &str) -> String {
    format!("{}{}", heading_title.trim(), HEADING_TERMINATOR)
}

/// Resolve a section body with the default [`BoundaryPolicy::ShortNumeral`]
pub fn resolve_section(full_text: &str, heading_title: &str) -> Result<SectionBody, SectionError> {
    resolve_section_with(full_text, heading_title, BoundaryPolicy::default())
}

/// Resolve a section body, choosing how the body end is detected
pub fn resolve_section_with(
    full_text: &str,
    heading_title: &str,
    policy: BoundaryPolicy,
) -> Result<SectionBody, SectionError> {
    let signature = heading_signature(heading_title);

    let heading = STRICT_HEADING_PATTERN
        .find_iter(full_text)
        .find(|m| m.as_str().contains(&signature))
        .ok_or_else(|| SectionError::NotFound {
            heading: heading_title.trim().to_string(),
        })?;

    let start = heading.end();
    let end = body_end(full_text, start, policy);
    let body_text = strip_markup(&full_text[start..end]).trim().to_string();

    Ok(SectionBody {
        heading: heading_title.trim().to_string(),
        body_text,
        start_offset: start,
        end_offset: end,
    })
}

fn body_end(full_text: &str, start: usize, policy: BoundaryPolicy) -> usize {
    let next = match policy {
        BoundaryPolicy::ShortNumeral => SHORT_NUMERAL_PATTERN.find_at(full_text, start),
        BoundaryPolicy::StrictHeading => STRICT_HEADING_PATTERN.find_at(full_text, start),
    };
    next.map_or(full_text.len(), |m| m.start())
}
