//! Error types for the Bare Acts server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalogue::CatalogueError;
use remote_sources::{LookupError, ScrapeError};
use section_engine::SectionError;
use serde::Serialize;
use shared_pdf::PdfError;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Content for section '{0}' not found.")]
    SectionNotFound(String),

    #[error("Document '{0}' not found")]
    DocumentNotFound(String),

    #[error("No definition found for '{0}'")]
    DefinitionNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Extraction timeout after {0}ms")]
    Timeout(u64),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl ServerError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ServerError::SectionNotFound(_) => (StatusCode::NOT_FOUND, "SECTION_NOT_FOUND"),
            ServerError::DocumentNotFound(_) => (StatusCode::NOT_FOUND, "DOCUMENT_NOT_FOUND"),
            ServerError::DefinitionNotFound(_) => (StatusCode::NOT_FOUND, "DEFINITION_NOT_FOUND"),
            ServerError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ServerError::InvalidPdf(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_PDF"),
            ServerError::MalformedInput(_) => (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_INPUT"),
            ServerError::ResourceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "RESOURCE_UNAVAILABLE")
            }
            ServerError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            ServerError::Timeout(_) => (StatusCode::REQUEST_TIMEOUT, "TIMEOUT"),
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::warn!("{}", self);
        }

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<SectionError> for ServerError {
    fn from(err: SectionError) -> Self {
        match err {
            SectionError::NotFound { heading } => ServerError::SectionNotFound(heading),
            SectionError::ResourceUnavailable(msg) => ServerError::ResourceUnavailable(msg),
            SectionError::MalformedInput(msg) => ServerError::MalformedInput(msg),
        }
    }
}

impl From<PdfError> for ServerError {
    fn from(err: PdfError) -> Self {
        match err {
            PdfError::Parse(msg) => ServerError::InvalidPdf(msg),
        }
    }
}

impl From<LookupError> for ServerError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound { word } => ServerError::DefinitionNotFound(word),
            LookupError::Transient(msg) => ServerError::Upstream(msg),
        }
    }
}

impl From<ScrapeError> for ServerError {
    fn from(err: ScrapeError) -> Self {
        ServerError::Internal(err.to_string())
    }
}

impl From<CatalogueError> for ServerError {
    fn from(err: CatalogueError) -> Self {
        match err {
            CatalogueError::Io { .. } => ServerError::ResourceUnavailable(err.to_string()),
            other => ServerError::Internal(other.to_string()),
        }
    }
}
