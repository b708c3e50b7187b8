//! Circular downloads from the paginated notifications listing
//!
//! Each listing page holds a table whose rows carry a title cell and a cell
//! with the download link, whose text ends in the file size, e.g.
//! `Download (245 KB)`. A circular is identified by its title and size.

use crate::error::ScrapeError;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_CIRCULARS_URL: &str = "https://www.mha.gov.in/en/notifications/circular";
pub const DEFAULT_PAGE_COUNT: usize = 6;

const MAX_FILE_STEM_CHARS: usize = 100;

/// One downloadable circular found on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub title: String,
    pub download_url: String,
    pub file_size: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub rows: Vec<ListingRow>,
    /// Rows with too few cells or no usable link
    pub skipped_rows: usize,
    pub has_table: bool,
}

/// Counts from one update run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSummary {
    pub downloaded: usize,
    pub existing: usize,
    pub duplicates: usize,
    pub failed: usize,
    pub skipped_rows: usize,
}

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub base_url: String,
    pub page_count: usize,
    pub output_dir: PathBuf,
}

impl ScraperConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: DEFAULT_CIRCULARS_URL.to_string(),
            page_count: DEFAULT_PAGE_COUNT,
            output_dir: output_dir.into(),
        }
    }
}

struct ListingSelectors {
    table: Selector,
    row: Selector,
    cell: Selector,
    link: Selector,
}

impl ListingSelectors {
    fn new() -> Option<Self> {
        Some(Self {
            table: Selector::parse("table").ok()?,
            row: Selector::parse("tr").ok()?,
            cell: Selector::parse("td").ok()?,
            link: Selector::parse("a[href]").ok()?,
        })
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn parse_row(row: ElementRef<'_>, selectors: &ListingSelectors, origin: &str) -> Option<ListingRow> {
    let cells: Vec<ElementRef<'_>> = row.select(&selectors.cell).collect();
    if cells.len() < 3 {
        debug!("Row has {} cell(s), skipping", cells.len());
        return None;
    }

    let title = element_text(cells[1]);
    let anchor = cells[2].select(&selectors.link).next()?;
    let href = anchor.value().attr("href")?.trim();

    let file_size = element_text(anchor)
        .split_whitespace()
        .last()?
        .trim_matches(|c| c == '(' || c == ')')
        .to_string();

    let download_url = if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", origin, href)
    };

    Some(ListingRow {
        title,
        download_url,
        file_size,
    })
}

/// Parse one listing page. Relative links are prefixed with `origin`
/// (scheme and host, no trailing slash).
pub fn parse_listing(html: &str, origin: &str) -> ListingPage {
    let Some(selectors) = ListingSelectors::new() else {
        return ListingPage::default();
    };
    let document = Html::parse_document(html);

    let Some(table) = document.select(&selectors.table).next() else {
        return ListingPage::default();
    };

    let mut page = ListingPage {
        has_table: true,
        ..Default::default()
    };
    // first row is the header
    for row in table.select(&selectors.row).skip(1) {
        match parse_row(row, &selectors, origin) {
            Some(parsed) => page.rows.push(parsed),
            None => page.skipped_rows += 1,
        }
    }
    page
}

/// Stable identifier of a circular: SHA-256 hex of `"<title>_<size>"`
pub fn circular_file_id(title: &str, file_size: &str) -> String {
    hex::encode(Sha256::digest(format!("{}_{}", title, file_size).as_bytes()))
}

/// File name for a downloaded circular
pub fn circular_file_name(title: &str, file_size: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_numeric() || *c == ' ')
        .collect();
    let stem: String = cleaned.trim_end().chars().take(MAX_FILE_STEM_CHARS).collect();
    let size: String = file_size
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{}_{}.pdf", stem, size)
}

/// Downloads new circulars into a local directory
#[derive(Debug, Clone)]
pub struct CircularScraper {
    client: reqwest::Client,
    config: ScraperConfig,
}

impl CircularScraper {
    pub fn new(client: reqwest::Client, config: ScraperConfig) -> Self {
        Self { client, config }
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    fn origin(&self) -> Result<String, ScrapeError> {
        let url = reqwest::Url::parse(&self.config.base_url)
            .map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", self.config.base_url, e)))?;
        Ok(url.origin().ascii_serialization())
    }

    async fn fetch_listing(&self, page_index: usize) -> Result<String, reqwest::Error> {
        let url = format!("{}?page={}", self.config.base_url, page_index);
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }

    async fn download(&self, url: &str, destination: &Path) -> Result<(), String> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| e.to_string())?
            .bytes()
            .await
            .map_err(|e| e.to_string())?;
        tokio::fs::write(destination, &bytes)
            .await
            .map_err(|e| e.to_string())
    }

    /// Walk every listing page and download circulars not yet on disk.
    ///
    /// Failed listing pages and failed downloads are logged and counted;
    /// only an invalid base URL or an unusable output directory abort.
    pub async fn update(&self) -> Result<UpdateSummary, ScrapeError> {
        let origin = self.origin()?;
        tokio::fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(|source| ScrapeError::Io {
                path: self.config.output_dir.display().to_string(),
                source,
            })?;

        let mut summary = UpdateSummary::default();
        let mut seen: HashSet<String> = HashSet::new();

        for page_index in 0..self.config.page_count {
            let html = match self.fetch_listing(page_index).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("Failed to fetch listing page {}: {}", page_index, e);
                    continue;
                }
            };

            let listing = parse_listing(&html, &origin);
            if !listing.has_table {
                warn!("No table found on listing page {}", page_index);
            }
            summary.skipped_rows += listing.skipped_rows;

            for row in listing.rows {
                let id = circular_file_id(&row.title, &row.file_size);
                if seen.contains(&id) {
                    debug!("Duplicate circular, skipping: {}", row.title);
                    summary.duplicates += 1;
                    continue;
                }

                let destination = self
                    .config
                    .output_dir
                    .join(circular_file_name(&row.title, &row.file_size));
                if tokio::fs::try_exists(&destination).await.unwrap_or(false) {
                    debug!("Already downloaded: {}", row.title);
                    summary.existing += 1;
                    seen.insert(id);
                    continue;
                }

                match self.download(&row.download_url, &destination).await {
                    Ok(()) => {
                        info!("Downloaded circular: {}", row.title);
                        summary.downloaded += 1;
                        seen.insert(id);
                    }
                    Err(e) => {
                        warn!("Failed to download {} from {}: {}", row.title, row.download_url, e);
                        summary.failed += 1;
                    }
                }
            }
        }

        info!(
            "Circular update finished: {} downloaded, {} existing, {} failed",
            summary.downloaded, summary.existing, summary.failed
        );
        Ok(summary)
    }
}
