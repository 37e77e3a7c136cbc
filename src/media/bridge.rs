use tracing::{debug, info, instrument, trace, warn};

use crate::episodes::Episode;
use crate::media::handle::{Generation, MediaEvent, MediaEventKind, MediaHandle};
use crate::media::position::{whole_seconds, PlaybackPosition};
use crate::media::MediaError;
use crate::player::{PlaybackSnapshot, PlaybackStore};

const LOG_TARGET: &str = "podcastr::media::bridge";

/// Keeps a media handle in agreement with the playback store.
///
/// State flows down through [`MediaBridge::reconcile`], which compares the store
/// before and after a mutation and issues the matching handle calls. Handle
/// signals flow up through [`MediaBridge::handle_event`]. This is the only type
/// that talks to the handle.
pub struct MediaBridge<H: MediaHandle> {
    handle: H,
    generation: Generation,
    bound_episode_id: Option<String>,
    /// Last known play state of the handle itself
    handle_playing: bool,
    autoplay: bool,
    position: PlaybackPosition,
    detached: bool,
}

impl<H: MediaHandle> MediaBridge<H> {
    pub fn new(handle: H, autoplay: bool) -> Self {
        MediaBridge {
            handle,
            generation: 0,
            bound_episode_id: None,
            handle_playing: false,
            autoplay,
            position: PlaybackPosition::default(),
            detached: false,
        }
    }

    pub fn position(&self) -> &PlaybackPosition {
        &self.position
    }

    /// Generation of the currently bound source.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn bound_episode_id(&self) -> Option<&str> {
        self.bound_episode_id.as_deref()
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Issues the handle calls needed to move from `previous` to `next`.
    #[instrument(skip_all, fields(generation = self.generation))]
    pub fn reconcile(&mut self, previous: &PlaybackSnapshot, next: &PlaybackSnapshot) {
        if self.detached {
            return;
        }

        let next_id = next.current_episode.as_ref().map(|e| e.id.as_str());
        if next_id != self.bound_episode_id.as_deref() {
            match &next.current_episode {
                Some(episode) => self.bind(episode, next),
                None => self.unbind(),
            }
            return;
        }

        if self.bound_episode_id.is_none() {
            return;
        }

        if previous.is_looping != next.is_looping {
            let result = self.handle.set_loop(next.is_looping);
            self.log_failure("set_loop", result);
        }

        if next.is_playing && !self.handle_playing {
            self.issue_play();
        } else if !next.is_playing && self.handle_playing {
            self.issue_pause();
        }
    }

    /// Applies a handle signal to the position and the store.
    ///
    /// Returns false when the event belonged to a source that is no longer bound.
    pub fn handle_event(&mut self, event: MediaEvent, store: &mut PlaybackStore) -> bool {
        if self.detached || self.bound_episode_id.is_none() || event.generation != self.generation {
            trace!(target: LOG_TARGET, "Discarding stale media event {:?} (current generation {})", event, self.generation);
            return false;
        }

        match event.kind {
            MediaEventKind::TimeUpdate { current_time } => {
                self.position.elapsed_seconds = whole_seconds(current_time);
            }
            MediaEventKind::LoadedMetadata { duration } => {
                debug!(target: LOG_TARGET, "Metadata loaded, duration {:.1}s", duration);
                let result = self.handle.set_current_time(0.0);
                self.log_failure("set_current_time", result);
                self.position = PlaybackPosition::loaded(whole_seconds(duration));
            }
            MediaEventKind::Play => {
                self.handle_playing = true;
                store.set_playing_state(true);
            }
            MediaEventKind::Pause => {
                self.handle_playing = false;
                store.set_playing_state(false);
            }
            MediaEventKind::Ended => {
                self.handle_playing = false;
                if store.has_next() {
                    info!(target: LOG_TARGET, "Episode ended, advancing to next.");
                    store.advance_to_next();
                } else {
                    info!(target: LOG_TARGET, "Episode ended, end of playlist reached.");
                    store.clear_playback_state();
                }
            }
        }
        true
    }

    /// Moves playback to `seconds`, updating the position before the handle reports it.
    pub fn seek(&mut self, seconds: u64) {
        if self.detached || self.bound_episode_id.is_none() {
            debug!(target: LOG_TARGET, "Seek ignored: no episode bound.");
            return;
        }
        let result = self.handle.set_current_time(seconds as f64);
        self.log_failure("set_current_time", result);
        self.position.elapsed_seconds = seconds;
    }

    /// Releases the handle's listeners. Further calls and events are ignored.
    pub fn detach(&mut self) {
        if self.detached {
            return;
        }
        info!(target: LOG_TARGET, "Detaching media handle.");
        self.handle.detach();
        self.detached = true;
        self.bound_episode_id = None;
        self.handle_playing = false;
    }

    fn bind(&mut self, episode: &Episode, next: &PlaybackSnapshot) {
        self.generation += 1;
        info!(target: LOG_TARGET, episode_id = %episode.id, generation = self.generation, "Binding new source: {}", episode.url);

        self.handle_playing = false;
        // Nothing of the previous episode's position applies to this one
        self.position = PlaybackPosition::default();
        self.bound_episode_id = Some(episode.id.clone());

        let result = self.handle.set_src(&episode.url, self.generation);
        self.log_failure("set_src", result);
        let result = self.handle.set_loop(next.is_looping);
        self.log_failure("set_loop", result);

        if next.is_playing || self.autoplay {
            self.issue_play();
        }
    }

    fn unbind(&mut self) {
        info!(target: LOG_TARGET, "No current episode, unloading source.");
        if self.handle_playing {
            self.issue_pause();
        }
        let result = self.handle.unload();
        self.log_failure("unload", result);
        // Late events from the old source must not match
        self.generation += 1;
        self.bound_episode_id = None;
        self.handle_playing = false;
        self.position = PlaybackPosition::default();
    }

    fn issue_play(&mut self) {
        match self.handle.play() {
            Ok(()) => self.handle_playing = true,
            Err(e) => warn!(target: LOG_TARGET, "Media handle failed to play: {}", e),
        }
    }

    fn issue_pause(&mut self) {
        match self.handle.pause() {
            Ok(()) => self.handle_playing = false,
            Err(e) => warn!(target: LOG_TARGET, "Media handle failed to pause: {}", e),
        }
    }

    fn log_failure(&self, operation: &str, result: Result<(), MediaError>) {
        if let Err(e) = result {
            warn!(target: LOG_TARGET, "Media handle {} failed: {}", operation, e);
        }
    }
}

impl<H: MediaHandle> Drop for MediaBridge<H> {
    fn drop(&mut self) {
        self.detach();
    }
}
