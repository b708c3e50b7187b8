//! Bare Acts Server
//!
//! Serves a library of statutory texts and government circulars. Provides
//! REST API endpoints for:
//!
//! - Act and circular catalogues with sorting
//! - PDF analysis (page text and section heading index)
//! - Section lookup by heading
//! - Keyword comparison against the Bare Acts compilation
//! - Dictionary lookup
//! - Circular downloads from the notifications listing
//!
//! Every option can also be set through a `BAREACTS_*` environment variable
//! or a `.env` file.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use remote_sources::{CircularScraper, DictionaryClient, ScraperConfig};
use section_engine::{HeadingScope, SectionEngine};
use shared_pdf::PdfReferenceCorpus;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod state;
#[cfg(test)]
mod tests;

use api::{
    handle_analyze, handle_common_keywords, handle_dictionary, handle_document_analysis,
    handle_get_document, handle_health, handle_list_acts, handle_list_circulars, handle_section,
    handle_update_circulars,
};
use state::{AppState, ServerConfig};

/// Command-line arguments for the Bare Acts server
#[derive(Parser, Debug)]
#[command(name = "bareacts-server")]
#[command(about = "Bare Acts server for statutory section lookup")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "BAREACTS_PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "BAREACTS_HOST", default_value = "0.0.0.0")]
    host: String,

    /// PDF extraction timeout in milliseconds
    #[arg(long, env = "BAREACTS_EXTRACT_TIMEOUT_MS", default_value = "10000")]
    extract_timeout_ms: u64,

    /// Rate limit: requests per second per IP
    #[arg(long, env = "BAREACTS_RATE_LIMIT", default_value = "10")]
    rate_limit: u32,

    /// Largest accepted upload in bytes
    #[arg(long, env = "BAREACTS_MAX_UPLOAD_BYTES", default_value = "52428800")]
    max_upload_bytes: usize,

    /// Directory holding the act PDFs
    #[arg(long, env = "BAREACTS_DOCUMENTS_DIR", default_value = "All_Documents")]
    documents_dir: PathBuf,

    /// Directory holding one `<stem>.txt` metadata file per act PDF
    #[arg(long, env = "BAREACTS_METADATA_DIR", default_value = "Cleaned_Metadata")]
    metadata_dir: PathBuf,

    /// Directory holding circular metadata files
    #[arg(long, env = "BAREACTS_CIRCULARS_DIR", default_value = "Circulars")]
    circulars_dir: PathBuf,

    /// Directory new circular PDFs are downloaded into
    #[arg(long, env = "BAREACTS_CIRCULAR_DOWNLOAD_DIR", default_value = "Circulars_37")]
    circular_download_dir: PathBuf,

    /// The Bare Acts compilation used for keyword comparison
    #[arg(
        long,
        env = "BAREACTS_REFERENCE_PDF",
        default_value = shared_pdf::DEFAULT_REFERENCE_PDF
    )]
    reference_pdf: PathBuf,

    /// Dictionary service base URL
    #[arg(
        long,
        env = "BAREACTS_DICTIONARY_URL",
        default_value = remote_sources::DEFAULT_DICTIONARY_URL
    )]
    dictionary_url: String,

    /// Circulars listing URL
    #[arg(
        long,
        env = "BAREACTS_CIRCULARS_URL",
        default_value = remote_sources::DEFAULT_CIRCULARS_URL
    )]
    circulars_url: String,

    /// Number of listing pages visited per circular update
    #[arg(long, env = "BAREACTS_CIRCULAR_PAGES", default_value = "6")]
    circular_pages: usize,

    /// Pages scanned for section headings (0 scans every page)
    #[arg(long, env = "BAREACTS_HEADING_PAGES", default_value = "2")]
    heading_pages: usize,

    /// Timeout for outbound HTTP requests in seconds
    #[arg(long, env = "BAREACTS_HTTP_TIMEOUT_SECS", default_value = "10")]
    http_timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long, env = "BAREACTS_VERBOSE")]
    verbose: bool,
}

impl Args {
    fn heading_scope(&self) -> HeadingScope {
        match self.heading_pages {
            0 => HeadingScope::AllPages,
            n => HeadingScope::LeadingPages(n),
        }
    }
}

/// Milliseconds to replenish one request at the given per-second rate
fn replenish_interval_ms(requests_per_second: u32) -> Option<u64> {
    (requests_per_second > 0).then(|| (1000 / u64::from(requests_per_second)).max(1))
}

/// Routes and per-request middleware, without rate limiting
fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        // Health check
        .route("/health", get(handle_health))
        // Catalogues
        .route("/api/acts", get(handle_list_acts))
        .route("/api/circulars", get(handle_list_circulars))
        .route("/api/circulars/update", post(handle_update_circulars))
        // Documents
        .route("/api/documents/:name", get(handle_get_document))
        .route("/api/documents/:name/analysis", get(handle_document_analysis))
        .route("/api/analyze", post(handle_analyze))
        // Sections and vocabulary
        .route("/api/sections", post(handle_section))
        .route("/api/keywords/common", post(handle_common_keywords))
        .route("/api/dictionary/:word", get(handle_dictionary))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Bare Acts server on {}:{}", args.host, args.port);

    // Create rate limiter configuration
    let replenish_ms = replenish_interval_ms(args.rate_limit)
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limit: {}", args.rate_limit))?;
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(replenish_ms)
            .burst_size(args.rate_limit.saturating_mul(2))
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limit: {}", args.rate_limit))?,
    );

    // Outbound clients
    let http = remote_sources::http_client(Duration::from_secs(args.http_timeout_secs))?;
    let dictionary = DictionaryClient::new(http.clone(), args.dictionary_url.clone());
    let scraper = CircularScraper::new(
        http,
        ScraperConfig {
            base_url: args.circulars_url.clone(),
            page_count: args.circular_pages,
            output_dir: args.circular_download_dir.clone(),
        },
    );

    // Create shared state
    let engine = SectionEngine::new().with_scope(args.heading_scope());
    let state = AppState::new(
        ServerConfig {
            documents_dir: args.documents_dir.clone(),
            metadata_dir: args.metadata_dir.clone(),
            circulars_dir: args.circulars_dir.clone(),
            extract_timeout_ms: args.extract_timeout_ms,
            max_upload_bytes: args.max_upload_bytes,
        },
        engine,
        Arc::new(PdfReferenceCorpus::new(args.reference_pdf.clone())),
        dictionary,
        scraper,
    );

    let app = build_router(state).layer(GovernorLayer {
        config: governor_conf,
    });

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Extraction timeout: {}ms", args.extract_timeout_ms);
    info!("Documents: {}", args.documents_dir.display());

    // the rate limiter keys on the peer address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
