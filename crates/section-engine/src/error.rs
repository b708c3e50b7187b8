use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SectionError {
    #[error("Content for section '{heading}' not found")]
    NotFound { heading: String },

    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),
}
