use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("No definition found for '{word}'")]
    NotFound { word: String },

    #[error("Dictionary lookup failed: {0}")]
    Transient(String),
}

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Invalid circulars URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to prepare {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
