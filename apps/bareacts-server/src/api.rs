//! API handlers for the Bare Acts server
//!
//! Provides REST endpoints for:
//! - Act and circular catalogues
//! - Document download and section analysis
//! - Section lookup with optional keyword highlighting
//! - Keyword comparison against the Bare Acts corpus
//! - Dictionary lookup and circular updates

use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use catalogue::{load_acts, load_circulars, sort_acts, sort_circulars, ActSort, CircularSort};
use remote_sources::UpdateSummary;
use section_engine::{highlight_keyword, intersect_keywords, BoundaryPolicy, DocumentAnalysis};
use serde::{Deserialize, Serialize};
use shared_pdf::{document_hash, extract_pages};
use shared_types::{ActRecord, CircularRecord, HeadingCandidate};
use tracing::{debug, info};

use crate::error::ServerError;
use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "bareacts-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Run blocking work off the async runtime
async fn run_blocking<T, F>(task: F) -> Result<T, ServerError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ServerError::Internal(format!("Background task failed: {}", e)))
}

// ---------------------------------------------------------------------------
// Catalogues
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct ActListQuery {
    #[serde(default)]
    pub sort: ActSort,
}

#[derive(Serialize)]
pub struct ActListResponse {
    pub success: bool,
    pub count: usize,
    pub acts: Vec<ActRecord>,
}

/// Handler: GET /api/acts
pub async fn handle_list_acts(
    State(state): State<AppState>,
    Query(query): Query<ActListQuery>,
) -> Result<Json<ActListResponse>, ServerError> {
    let config = state.config.clone();
    let mut acts =
        run_blocking(move || load_acts(&config.documents_dir, &config.metadata_dir)).await??;
    sort_acts(&mut acts, query.sort);

    Ok(Json(ActListResponse {
        success: true,
        count: acts.len(),
        acts,
    }))
}

#[derive(Deserialize)]
pub struct CircularListQuery {
    #[serde(default)]
    pub sort: CircularSort,
}

#[derive(Serialize)]
pub struct CircularListResponse {
    pub success: bool,
    pub count: usize,
    pub circulars: Vec<CircularRecord>,
}

/// Handler: GET /api/circulars
pub async fn handle_list_circulars(
    State(state): State<AppState>,
    Query(query): Query<CircularListQuery>,
) -> Result<Json<CircularListResponse>, ServerError> {
    let config = state.config.clone();
    let mut circulars = run_blocking(move || load_circulars(&config.circulars_dir)).await??;
    sort_circulars(&mut circulars, query.sort);

    Ok(Json(CircularListResponse {
        success: true,
        count: circulars.len(),
        circulars,
    }))
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Reject names that could escape the documents directory
pub fn validate_document_name(name: &str) -> Result<(), ServerError> {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(ServerError::InvalidRequest(format!(
            "Invalid document name '{}'",
            name
        )));
    }
    Ok(())
}

async fn read_document(state: &AppState, name: &str) -> Result<Vec<u8>, ServerError> {
    validate_document_name(name)?;
    let path = state.config.documents_dir.join(name);
    tokio::fs::read(&path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ServerError::DocumentNotFound(name.to_string()),
        _ => ServerError::Internal(format!("Failed to read {}: {}", path.display(), e)),
    })
}

/// Handler: GET /api/documents/:name
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let bytes = read_document(&state, &name).await?;
    Ok(([(header::CONTENT_TYPE, "application/pdf")], bytes))
}

/// Extracted pages plus the heading index of one PDF
#[derive(Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    /// SHA-256 of the uploaded bytes
    pub document_id: String,
    pub page_count: usize,
    pub pages: Vec<String>,
    pub full_text: String,
    pub headings: Vec<HeadingCandidate>,
    pub warnings: Vec<String>,
}

/// Extract and analyse a PDF with the configured timeout
async fn analyze_pdf(state: &AppState, bytes: Vec<u8>) -> Result<AnalysisResponse, ServerError> {
    let engine = state.engine;
    let timeout_ms = state.config.extract_timeout_ms;

    let result = tokio::time::timeout(
        Duration::from_millis(timeout_ms),
        tokio::task::spawn_blocking(move || {
            let pages = extract_pages(&bytes)?;
            let analysis = engine.analyze(&pages);
            Ok::<_, ServerError>((document_hash(&bytes), pages, analysis))
        }),
    )
    .await;

    let (document_id, pages, analysis) = match result {
        Ok(Ok(extracted)) => extracted?,
        Ok(Err(join_error)) => {
            return Err(ServerError::Internal(format!(
                "Extraction task panicked: {}",
                join_error
            )));
        }
        Err(_timeout) => return Err(ServerError::Timeout(timeout_ms)),
    };

    let DocumentAnalysis {
        page_count,
        full_text,
        headings,
        warnings,
    } = analysis;
    debug!(
        "Analysed document {}: {} page(s), {} heading(s)",
        document_id,
        page_count,
        headings.len()
    );

    Ok(AnalysisResponse {
        success: true,
        document_id,
        page_count,
        pages: pages.pages().to_vec(),
        full_text,
        headings,
        warnings,
    })
}

/// Handler: GET /api/documents/:name/analysis
pub async fn handle_document_analysis(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<AnalysisResponse>, ServerError> {
    let bytes = read_document(&state, &name).await?;
    info!("Analysis request: document={}", name);
    Ok(Json(analyze_pdf(&state, bytes).await?))
}

/// Handler: POST /api/analyze
///
/// The request body is the raw PDF.
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalysisResponse>, ServerError> {
    if body.is_empty() {
        return Err(ServerError::InvalidRequest("Empty request body".into()));
    }
    info!("Analysis request: upload of {} bytes", body.len());
    Ok(Json(analyze_pdf(&state, body.to_vec()).await?))
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct SectionRequest {
    /// Full document text as returned by the analysis endpoints
    pub full_text: String,

    /// Heading as listed in the analysis (e.g. "3. Penalty.")
    pub heading: String,

    /// Where the section body ends; defaults to the next short numeral
    #[serde(default)]
    pub boundary: Option<BoundaryPolicy>,

    /// Keyword to mark in the returned body
    #[serde(default)]
    pub highlight: Option<String>,
}

#[derive(Serialize)]
pub struct SectionResponse {
    pub success: bool,
    pub heading: String,
    pub body: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Handler: POST /api/sections
pub async fn handle_section(
    State(state): State<AppState>,
    Json(req): Json<SectionRequest>,
) -> Result<Json<SectionResponse>, ServerError> {
    if req.heading.trim().is_empty() {
        return Err(ServerError::InvalidRequest("Heading must not be empty".into()));
    }
    debug!("Section request: heading={}", req.heading);

    let engine = match req.boundary {
        Some(boundary) => state.engine.with_boundary(boundary),
        None => state.engine,
    };
    let section = engine.resolve(&req.full_text, &req.heading)?;

    let body = match req.highlight.as_deref() {
        Some(keyword) => highlight_keyword(&section.body_text, keyword.trim()),
        None => section.body_text,
    };

    Ok(Json(SectionResponse {
        success: true,
        heading: section.heading,
        body,
        start_offset: section.start_offset,
        end_offset: section.end_offset,
    }))
}

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct KeywordRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct KeywordResponse {
    pub success: bool,
    pub count: usize,
    pub keywords: Vec<String>,
}

/// Handler: POST /api/keywords/common
pub async fn handle_common_keywords(
    State(state): State<AppState>,
    Json(req): Json<KeywordRequest>,
) -> Result<Json<KeywordResponse>, ServerError> {
    let reference = state.reference_keywords().await?;
    let keywords: Vec<String> = intersect_keywords(&req.text, reference).into_iter().collect();

    Ok(Json(KeywordResponse {
        success: true,
        count: keywords.len(),
        keywords,
    }))
}

// ---------------------------------------------------------------------------
// Remote sources
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct DefinitionResponse {
    pub success: bool,
    pub word: String,
    pub definition: String,
}

/// Handler: GET /api/dictionary/:word
pub async fn handle_dictionary(
    State(state): State<AppState>,
    Path(word): Path<String>,
) -> Result<Json<DefinitionResponse>, ServerError> {
    let definition = state.dictionary.lookup(&word).await?;
    Ok(Json(DefinitionResponse {
        success: true,
        word: word.trim().to_string(),
        definition,
    }))
}

#[derive(Serialize)]
pub struct UpdateResponse {
    pub success: bool,
    #[serde(flatten)]
    pub summary: UpdateSummary,
}

/// Handler: POST /api/circulars/update
pub async fn handle_update_circulars(
    State(state): State<AppState>,
) -> Result<Json<UpdateResponse>, ServerError> {
    info!(
        "Circular update requested into {}",
        state.scraper.output_dir().display()
    );
    let summary = state.scraper.update().await?;
    Ok(Json(UpdateResponse {
        success: true,
        summary,
    }))
}
