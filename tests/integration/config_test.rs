//! Integration tests for configuration management
//!
//! These tests verify that the configuration system works correctly
//! across module boundaries.

use podcastr::config::Settings;
use std::error::Error;
use tempfile::tempdir;

#[cfg(test)]
mod config_integration_tests {
    use super::*;

    /// Test complete configuration workflow
    #[test]
    fn test_config_lifecycle() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let config_path = dir.path().join("nested").join("config.json");

        let mut settings = Settings::default();
        settings.episode_source = "http://localhost:3333".to_string();
        settings.episode_limit = 5;
        settings.autoplay = false;
        settings.seek_step_seconds = 30;
        settings.log_file = Some(dir.path().join("podcastr.log"));

        settings.validate()?;
        settings.save(&config_path)?;

        let loaded_settings = Settings::load(&config_path)?;
        assert_eq!(loaded_settings, settings);

        // Options handed to the player follow the file
        let options = loaded_settings.player_options();
        assert!(!options.autoplay);
        assert_eq!(options.command_buffer_size, settings.command_buffer_size);

        let mut updated_settings = loaded_settings;
        updated_settings.episode_source = "server.json".to_string();
        updated_settings.save(&config_path)?;

        let reloaded_settings = Settings::load(&config_path)?;
        assert_eq!(reloaded_settings.episode_source, "server.json");
        assert_eq!(reloaded_settings.episode_limit, 5);

        Ok(())
    }

    /// A partial file keeps the defaults for everything it leaves out
    #[test]
    fn test_partial_config_uses_defaults() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, r#"{ "episode_limit": 3 }"#)?;

        let settings = Settings::load(&config_path)?;
        assert_eq!(settings.episode_limit, 3);
        assert_eq!(settings.episode_source, Settings::default().episode_source);
        assert!(settings.autoplay);
        Ok(())
    }

    /// Test invalid configuration handling
    #[test]
    fn test_invalid_config_validation() {
        let invalid_settings = Settings {
            episode_source: "  ".to_string(),
            ..Settings::default()
        };

        let result = invalid_settings.validate();
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("Episode source cannot be empty"));
        }

        let no_step = Settings {
            seek_step_seconds: 0,
            ..Settings::default()
        };
        assert!(no_step.validate().is_err());
    }

    #[test]
    fn test_malformed_config_is_an_error() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, "{ not json")?;

        assert!(Settings::load(&config_path).is_err());
        Ok(())
    }
}
