use thiserror::Error;

/// Error types reported by a media handle.
///
/// These never reach the playback store: the bridge logs them and waits for the
/// handle's own events to say what actually happened.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Media unavailable: {0}")]
    Unavailable(String),
}
