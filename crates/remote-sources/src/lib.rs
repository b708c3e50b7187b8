//! HTTP-backed sources: word definitions and the circulars listing

pub mod circulars;
pub mod dictionary;
pub mod error;

pub use circulars::{
    circular_file_id, circular_file_name, parse_listing, CircularScraper, ListingPage,
    ListingRow, ScraperConfig, UpdateSummary, DEFAULT_CIRCULARS_URL, DEFAULT_PAGE_COUNT,
};
pub use dictionary::{DictionaryClient, DEFAULT_DICTIONARY_URL};
pub use error::{LookupError, ScrapeError};

use std::time::Duration;

/// Shared HTTP client with a per-request timeout
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("bareacts/", env!("CARGO_PKG_VERSION")))
        .build()
}
