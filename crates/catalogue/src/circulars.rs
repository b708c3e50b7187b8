//! Circular metadata files and the circular listing

use crate::error::CatalogueError;
use crate::fs::{file_stem, files_with_extension, read_to_string};
use serde::{Deserialize, Serialize};
use shared_types::CircularRecord;
use std::path::Path;
use tracing::{debug, warn};

const FIELD_SEPARATOR: &str = ": ";

/// Ordering for the circular listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircularSort {
    #[default]
    Alphabetical,
    ReverseAlphabetical,
    Date,
}

/// Parse `Key: value` lines. Unknown keys and lines without a separator
/// are ignored; missing fields stay empty.
pub fn parse_circular_metadata(content: &str, pdf: &str) -> CircularRecord {
    let mut record = CircularRecord {
        pdf: pdf.to_string(),
        ..Default::default()
    };

    for line in content.lines() {
        let Some((key, value)) = line.trim().split_once(FIELD_SEPARATOR) else {
            continue;
        };
        let value = value.to_string();
        match key {
            "Issuer" => record.issuer = value,
            "Date" => record.date = value,
            "Signatory" => record.signatory = value,
            _ => {}
        }
    }

    record
}

/// Load every `*.txt` metadata file in `dir`
pub fn load_circulars(dir: &Path) -> Result<Vec<CircularRecord>, CatalogueError> {
    let files = files_with_extension(dir, "txt")?;
    debug!("Found {} circular metadata file(s)", files.len());

    let mut circulars = Vec::with_capacity(files.len());
    for path in files {
        let pdf = format!("{}.pdf", file_stem(&path));
        match read_to_string(&path) {
            Ok(content) => circulars.push(parse_circular_metadata(&content, &pdf)),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    Ok(circulars)
}

/// Sort circulars in place. The sort is stable.
pub fn sort_circulars(circulars: &mut [CircularRecord], sort: CircularSort) {
    match sort {
        CircularSort::Alphabetical => {
            circulars.sort_by_cached_key(|c| c.issuer.to_lowercase())
        }
        CircularSort::ReverseAlphabetical => circulars.sort_by(|a, b| {
            b.issuer.to_lowercase().cmp(&a.issuer.to_lowercase())
        }),
        // newest first by the raw date text
        CircularSort::Date => circulars.sort_by(|a, b| b.date.cmp(&a.date)),
    }
}
