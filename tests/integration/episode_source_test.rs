//! Integration tests for loading the episode catalog from a database file

use crate::test_utils::write_database;
use podcastr::episodes::{source_for, EpisodeCatalog, EpisodeSource, JsonFileSource, SourceError};

#[cfg(test)]
mod episode_source_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_file_source_feeds_catalog_newest_first() {
        let database = write_database(&[
            ("a-vida-e-boa", "2021-01-20 12:00:00", 3981),
            ("como-virar-lider", "2021-01-22 12:00:00", 1760),
            ("typescript", "2021-01-21 12:00:00", 2400),
            ("dart-flutter", "2021-01-19 12:00:00", 5100),
        ]);

        let source = JsonFileSource::new(database.path());
        let episodes = source.fetch_episodes(10).await.expect("database should load");
        let ids: Vec<&str> = episodes.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["como-virar-lider", "typescript", "a-vida-e-boa", "dart-flutter"]);
        assert_eq!(episodes[0].url, "https://example.com/como-virar-lider.m4a");
        assert_eq!(episodes[0].duration, 1760);

        let catalog = EpisodeCatalog::from_newest_first(episodes);
        assert_eq!(catalog.latest.len(), 2);
        assert_eq!(catalog.others.len(), 2);
        assert_eq!(catalog.all()[2].id, "a-vida-e-boa");
    }

    #[tokio::test]
    async fn test_file_source_respects_limit() {
        let database = write_database(&[
            ("one", "2021-01-01 10:00:00", 60),
            ("two", "2021-01-02 10:00:00", 60),
            ("three", "2021-01-03 10:00:00", 60),
        ]);

        let source = source_for(&database.path().to_string_lossy()).expect("path is a valid source");
        let episodes = source.fetch_episodes(2).await.expect("database should load");
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].id, "three");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = JsonFileSource::new(dir.path().join("missing.json"));
        let result = source.fetch_episodes(10).await;
        assert!(matches!(result, Err(SourceError::Io(_))));
    }
}
