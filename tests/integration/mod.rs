//! Integration tests module
//!
//! This module organizes all integration tests for the podcastr application.

pub mod config_test;
pub mod episode_source_test;
pub mod player_test;
