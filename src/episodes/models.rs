//! Data models for the episode catalog

use serde::{Deserialize, Serialize};

/// A playable podcast episode.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub members: String,
    pub thumbnail: String,
    pub url: String,
    /// Total length in whole seconds
    pub duration: u64,
}

/// Audio file block as served by the mocked API
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ApiEpisodeFile {
    pub url: String,
    #[serde(rename = "type", default)]
    pub mime_type: Option<String>,
    pub duration: u64,
}

/// Episode record as served by the mocked API
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ApiEpisode {
    pub id: String,
    pub title: String,
    pub members: String,
    #[serde(default)]
    pub published_at: Option<String>,
    pub thumbnail: String,
    #[serde(default)]
    pub description: Option<String>,
    pub file: ApiEpisodeFile,
}

impl From<ApiEpisode> for Episode {
    fn from(api: ApiEpisode) -> Self {
        Episode {
            id: api.id,
            title: api.title,
            members: api.members,
            thumbnail: api.thumbnail,
            url: api.file.url,
            duration: api.file.duration,
        }
    }
}

/// Layout of a json-server database file
#[derive(Deserialize, Serialize, Debug)]
pub struct EpisodeDatabase {
    pub episodes: Vec<ApiEpisode>,
}

/// Number of episodes shown in the "latest releases" block
pub const LATEST_RELEASES: usize = 2;

/// Episodes split the way the home listing shows them.
#[derive(Debug, Clone, Default)]
pub struct EpisodeCatalog {
    pub latest: Vec<Episode>,
    pub others: Vec<Episode>,
}

impl EpisodeCatalog {
    /// Splits a newest-first list into the latest releases and the rest.
    pub fn from_newest_first(mut episodes: Vec<Episode>) -> Self {
        let split_at = episodes.len().min(LATEST_RELEASES);
        let others = episodes.split_off(split_at);
        EpisodeCatalog { latest: episodes, others }
    }

    /// Playlist order used when playing from the listing.
    pub fn all(&self) -> Vec<Episode> {
        self.latest.iter().chain(self.others.iter()).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.latest.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
