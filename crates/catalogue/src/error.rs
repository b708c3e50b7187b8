use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("Missing '{field}' in {source_name}")]
    MissingField {
        field: &'static str,
        source_name: String,
    },

    #[error("Invalid '{field}' in {source_name}: {value}")]
    InvalidField {
        field: &'static str,
        source_name: String,
        value: String,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
