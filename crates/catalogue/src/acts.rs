//! Act metadata files and the act listing

use crate::dates::parse_act_date;
use crate::error::CatalogueError;
use crate::fs::{file_stem, files_with_extension, read_to_string};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use shared_types::ActRecord;
use std::path::Path;
use tracing::{debug, warn};

lazy_static! {
    static ref TITLE: Regex = Regex::new(r"Title:\s*(.*)").unwrap();
    static ref ACT_NUMBER: Regex = Regex::new(r"Act:\s*(\d+)").unwrap();
    static ref ACT_YEAR: Regex = Regex::new(r"Year:\s*(\d{4})").unwrap();
    static ref DATE: Regex = Regex::new(r"Date:\s*(\[.*?\])").unwrap();
}

/// Ordering for the act listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActSort {
    #[default]
    Alphabetical,
    ReverseAlphabetical,
    ActNumber,
    Date,
}

fn capture<'a>(
    pattern: &Regex,
    content: &'a str,
    field: &'static str,
    source_name: &str,
) -> Result<&'a str, CatalogueError> {
    pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| CatalogueError::MissingField {
            field,
            source_name: source_name.to_string(),
        })
}

/// Parse one act metadata file.
///
/// `pdf` is the file name of the document the metadata describes and is
/// also used to name the source in errors.
pub fn parse_act_metadata(content: &str, pdf: &str) -> Result<ActRecord, CatalogueError> {
    let title = capture(&TITLE, content, "Title", pdf)?;
    let act_number = capture(&ACT_NUMBER, content, "Act", pdf)?;
    let act_year = capture(&ACT_YEAR, content, "Year", pdf)?;
    let date = capture(&DATE, content, "Date", pdf)?;

    let act_number = act_number
        .parse::<u32>()
        .map_err(|_| CatalogueError::InvalidField {
            field: "Act",
            source_name: pdf.to_string(),
            value: act_number.to_string(),
        })?;
    let act_year = act_year
        .parse::<u16>()
        .map_err(|_| CatalogueError::InvalidField {
            field: "Year",
            source_name: pdf.to_string(),
            value: act_year.to_string(),
        })?;

    Ok(ActRecord {
        title: title.trim().to_string(),
        act_number,
        act_year,
        date: date.trim().to_string(),
        pdf: pdf.to_string(),
    })
}

/// Load every act in `pdf_dir` that has a `<stem>.txt` file in `metadata_dir`.
///
/// Documents without metadata are skipped silently; unreadable or incomplete
/// metadata is logged and skipped. Only failing to list either directory is
/// an error.
pub fn load_acts(pdf_dir: &Path, metadata_dir: &Path) -> Result<Vec<ActRecord>, CatalogueError> {
    let pdfs = files_with_extension(pdf_dir, "pdf")?;
    // fail early when the metadata directory itself is missing
    let metadata_files = files_with_extension(metadata_dir, "txt")?;
    debug!(
        "Found {} PDF(s) and {} metadata file(s)",
        pdfs.len(),
        metadata_files.len()
    );

    let mut acts = Vec::new();
    for pdf_path in pdfs {
        let stem = file_stem(&pdf_path);
        let metadata_path = metadata_dir.join(format!("{}.txt", stem));
        if !metadata_files.contains(&metadata_path) {
            continue;
        }

        let pdf_name = pdf_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let record = read_to_string(&metadata_path)
            .and_then(|content| parse_act_metadata(&content, &pdf_name));
        match record {
            Ok(record) => acts.push(record),
            Err(e) => warn!("Skipping {}: {}", metadata_path.display(), e),
        }
    }

    Ok(acts)
}

/// Sort acts in place. The sort is stable.
pub fn sort_acts(acts: &mut [ActRecord], sort: ActSort) {
    match sort {
        ActSort::Alphabetical => acts.sort_by(|a, b| a.title.cmp(&b.title)),
        ActSort::ReverseAlphabetical => acts.sort_by(|a, b| b.title.cmp(&a.title)),
        ActSort::ActNumber => acts.sort_by_key(|act| act.act_number),
        // unparseable dates sort first, ties fall back to the raw text
        ActSort::Date => acts.sort_by_cached_key(|act| (parse_act_date(&act.date), act.date.clone())),
    }
}
