use crate::media::error::MediaError;

/// Identifies one binding of a source to a handle. Bumped by the bridge every
/// time it loads a new source; events carry the value they were emitted for.
pub type Generation = u64;

/// Signals emitted by a media handle.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    /// Playback started or resumed.
    Play,
    /// Playback paused, including pauses from native controls and end of media.
    Pause,
    /// Playback position advanced.
    TimeUpdate { current_time: f64 },
    /// Metadata for the bound source is available.
    LoadedMetadata { duration: f64 },
    /// Playback reached the end of the media without looping.
    Ended,
}

/// A media handle signal tagged with the source generation it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    pub generation: Generation,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn new(generation: Generation, kind: MediaEventKind) -> Self {
        MediaEvent { generation, kind }
    }
}

/// Trait defining the controls of an audio-output handle.
///
/// Implementations deliver their signals asynchronously as [`MediaEvent`]s on the
/// channel they were constructed with, tagged with the generation passed to the
/// most recent [`MediaHandle::set_src`].
pub trait MediaHandle {
    /// Binds a new source. Any previous source is dropped and playback stops.
    fn set_src(&mut self, url: &str, generation: Generation) -> Result<(), MediaError>;

    /// Starts or resumes playback of the bound source.
    fn play(&mut self) -> Result<(), MediaError>;

    /// Pauses playback.
    fn pause(&mut self) -> Result<(), MediaError>;

    /// Moves the playback position, in seconds.
    fn set_current_time(&mut self, seconds: f64) -> Result<(), MediaError>;

    /// Sets whether the source restarts on completion.
    fn set_loop(&mut self, looping: bool) -> Result<(), MediaError>;

    /// Drops the bound source without emitting further events for it.
    fn unload(&mut self) -> Result<(), MediaError>;

    /// Releases listeners and background work. Must be idempotent.
    fn detach(&mut self);
}
