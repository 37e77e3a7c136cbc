//! Episode catalog: models and the sources that supply them

pub mod models;
pub mod source;

pub use models::*;
pub use source::{source_for, EpisodeSource, HttpEpisodeSource, JsonFileSource, SourceError};
