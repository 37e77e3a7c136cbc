//! Episode sources backed by the mocked API or its database file

use async_trait::async_trait;
use reqwest::Client;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument};
use url::Url;

use crate::episodes::models::{ApiEpisode, Episode, EpisodeDatabase};

const LOG_TARGET: &str = "podcastr::episodes::source";

/// Error types for loading the episode catalog
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Anything that can supply an ordered, newest-first list of episodes.
#[async_trait]
pub trait EpisodeSource: Send + Sync {
    async fn fetch_episodes(&self, limit: usize) -> Result<Vec<Episode>, SourceError>;
}

/// Sorts newest first and keeps at most `limit` episodes.
fn newest_first(mut episodes: Vec<ApiEpisode>, limit: usize) -> Vec<Episode> {
    // published_at is "YYYY-MM-DD hh:mm:ss", so string order is chronological
    episodes.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    episodes.into_iter().take(limit).map(Episode::from).collect()
}

/// Reads episodes straight from a json-server database file.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EpisodeSource for JsonFileSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_episodes(&self, limit: usize) -> Result<Vec<Episode>, SourceError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let database: EpisodeDatabase = serde_json::from_str(&content)?;
        debug!(target: LOG_TARGET, "Read {} episodes from database file", database.episodes.len());
        Ok(newest_first(database.episodes, limit))
    }
}

/// Fetches episodes from a json-server style HTTP API.
pub struct HttpEpisodeSource {
    client: Client,
    base_url: Url,
}

impl HttpEpisodeSource {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        // A trailing slash keeps Url::join from dropping the last path segment
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)?;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(HttpEpisodeSource { client, base_url })
    }

    /// URL of the episode listing request.
    pub fn episodes_url(&self, limit: usize) -> Result<Url, SourceError> {
        let mut url = self.base_url.join("episodes")?;
        url.query_pairs_mut()
            .append_pair("_limit", &limit.to_string())
            .append_pair("_sort", "published_at")
            .append_pair("_order", "desc");
        Ok(url)
    }
}

#[async_trait]
impl EpisodeSource for HttpEpisodeSource {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_episodes(&self, limit: usize) -> Result<Vec<Episode>, SourceError> {
        let url = self.episodes_url(limit)?;
        info!(target: LOG_TARGET, "Fetching episodes from {}", url);
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::InvalidResponse(format!(
                "episode listing returned HTTP {}",
                response.status()
            )));
        }
        let episodes: Vec<ApiEpisode> = response.json().await?;
        debug!(target: LOG_TARGET, "API returned {} episodes", episodes.len());
        Ok(newest_first(episodes, limit))
    }
}

/// Picks the source for a configured location: http(s) URLs go to the API,
/// anything else is treated as a database file path.
pub fn source_for(location: &str) -> Result<Box<dyn EpisodeSource>, SourceError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpEpisodeSource::new(location)?))
    } else {
        Ok(Box::new(JsonFileSource::new(location)))
    }
}
