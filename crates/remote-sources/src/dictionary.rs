//! Word definitions from a dictionaryapi.dev-compatible service

use crate::error::LookupError;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev";

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
struct Meaning {
    #[serde(default)]
    definitions: Vec<Definition>,
}

#[derive(Debug, Deserialize)]
struct Definition {
    definition: String,
}

#[derive(Debug, Clone)]
pub struct DictionaryClient {
    client: reqwest::Client,
    base_url: String,
}

impl DictionaryClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn entry_url(&self, word: &str) -> Result<reqwest::Url, LookupError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| LookupError::Transient(format!("invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::Transient(format!("invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "v2", "entries", "en", word]);
        Ok(url)
    }

    /// First definition of the first meaning of the first entry.
    ///
    /// Single attempt; callers decide whether to retry a `Transient` error.
    pub async fn lookup(&self, word: &str) -> Result<String, LookupError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(LookupError::NotFound {
                word: word.to_string(),
            });
        }

        let url = self.entry_url(word)?;
        debug!("Looking up '{}' at {}", word, url);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Transient(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound {
                word: word.to_string(),
            });
        }
        if !status.is_success() {
            return Err(LookupError::Transient(format!("HTTP {}", status)));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| LookupError::Transient(e.to_string()))?;

        first_definition(&body).ok_or_else(|| LookupError::NotFound {
            word: word.to_string(),
        })
    }
}

fn first_definition(body: &str) -> Option<String> {
    let entries: Vec<Entry> = serde_json::from_str(body).ok()?;
    entries
        .into_iter()
        .next()?
        .meanings
        .into_iter()
        .next()?
        .definitions
        .into_iter()
        .next()
        .map(|d| d.definition)
}
