/// Playback position of the currently bound episode.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlaybackPosition {
    pub elapsed_seconds: u64,
    /// Duration reported by the latest metadata, in whole seconds
    pub duration_seconds: Option<u64>,
    pub metadata_loaded: bool,
}

impl PlaybackPosition {
    /// Position right after a new source's metadata arrived.
    pub fn loaded(duration_seconds: u64) -> Self {
        PlaybackPosition {
            elapsed_seconds: 0,
            duration_seconds: Some(duration_seconds),
            metadata_loaded: true,
        }
    }
}

/// Converts a handle-reported time to whole elapsed seconds.
pub fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    }
}
