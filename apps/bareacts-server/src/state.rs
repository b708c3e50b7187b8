//! Shared application state

use std::path::PathBuf;
use std::sync::Arc;

use remote_sources::{CircularScraper, DictionaryClient};
use section_engine::{extract_keywords, ReferenceCorpus, SectionEngine, SectionError};
use shared_types::KeywordSet;
use tokio::sync::OnceCell;
use tracing::info;

/// Settings the handlers read at request time
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub documents_dir: PathBuf,
    pub metadata_dir: PathBuf,
    pub circulars_dir: PathBuf,
    pub extract_timeout_ms: u64,
    pub max_upload_bytes: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub engine: SectionEngine,
    pub dictionary: DictionaryClient,
    pub scraper: CircularScraper,
    corpus: Arc<dyn ReferenceCorpus + Send + Sync>,
    reference_keywords: Arc<OnceCell<KeywordSet>>,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        engine: SectionEngine,
        corpus: Arc<dyn ReferenceCorpus + Send + Sync>,
        dictionary: DictionaryClient,
        scraper: CircularScraper,
    ) -> Self {
        Self {
            config: Arc::new(config),
            engine,
            dictionary,
            scraper,
            corpus,
            reference_keywords: Arc::new(OnceCell::new()),
        }
    }

    /// Keywords of the reference corpus, loaded on first use.
    ///
    /// A failed load is not cached; the next request tries again.
    pub async fn reference_keywords(&self) -> Result<&KeywordSet, SectionError> {
        let corpus = Arc::clone(&self.corpus);
        self.reference_keywords
            .get_or_try_init(|| async move {
                let text = tokio::task::spawn_blocking(move || corpus.load())
                    .await
                    .map_err(|e| {
                        SectionError::ResourceUnavailable(format!("corpus loading failed: {}", e))
                    })??;
                let keywords = extract_keywords(&text);
                info!("Reference corpus loaded: {} keywords", keywords.len());
                Ok::<_, SectionError>(keywords)
            })
            .await
    }
}
