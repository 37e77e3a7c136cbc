use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::episodes::Episode;
use super::state::{PlaybackSnapshot, PlaybackState};

const LOG_TARGET: &str = "podcastr::player::store";

/// Owns [`PlaybackState`] and exposes the commands that mutate it.
///
/// Every command is synchronous and total. Calling them on an empty playlist is
/// a no-op where nothing sensible can happen.
#[derive(Debug)]
pub struct PlaybackStore {
    state: PlaybackState,
    rng: StdRng,
}

impl PlaybackStore {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates a store drawing shuffle picks from `rng`.
    pub fn with_rng(rng: StdRng) -> Self {
        PlaybackStore {
            state: PlaybackState::default(),
            rng,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn playlist(&self) -> &[Episode] {
        &self.state.playlist
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.state.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.state.is_shuffling
    }

    pub fn has_previous(&self) -> bool {
        self.state.current_index > 0
    }

    /// Shuffle always has a next pick; otherwise there must be a following episode.
    pub fn has_next(&self) -> bool {
        self.state.is_shuffling || self.state.current_index + 1 < self.state.playlist.len()
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.state.playlist.get(self.state.current_index)
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            episode_ids: self.state.playlist.iter().map(|e| e.id.clone()).collect(),
            current_index: self.state.current_index,
            current_episode: self.current_episode().cloned(),
            is_playing: self.state.is_playing,
            is_looping: self.state.is_looping,
            is_shuffling: self.state.is_shuffling,
            has_previous: self.has_previous(),
            has_next: self.has_next(),
        }
    }

    /// Plays one episode on its own.
    pub fn play_single(&mut self, episode: Episode) {
        debug!(target: LOG_TARGET, episode_id = %episode.id, "play_single");
        self.state.playlist = vec![episode];
        self.state.current_index = 0;
        self.state.is_playing = true;
    }

    /// Replaces the playlist and starts at `index`.
    ///
    /// `index` must be within `list`; this is not clamped.
    pub fn play_from_list(&mut self, list: Vec<Episode>, index: usize) {
        debug_assert!(index < list.len(), "play_from_list index {} out of range for {} episodes", index, list.len());
        debug!(target: LOG_TARGET, "play_from_list: {} episodes, index {}", list.len(), index);
        self.state.playlist = list;
        self.state.current_index = index;
        self.state.is_playing = true;
    }

    pub fn toggle_play(&mut self) {
        self.state.is_playing = !self.state.is_playing;
    }

    pub fn toggle_loop(&mut self) {
        self.state.is_looping = !self.state.is_looping;
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.is_shuffling = !self.state.is_shuffling;
    }

    /// Records what the media handle reported. Distinct from `toggle_play`,
    /// which is user intent.
    pub fn set_playing_state(&mut self, playing: bool) {
        trace!(target: LOG_TARGET, "set_playing_state({})", playing);
        self.state.is_playing = playing;
    }

    /// Empties the playlist. Playing, loop and shuffle flags are kept.
    pub fn clear_playback_state(&mut self) {
        debug!(target: LOG_TARGET, "clear_playback_state");
        self.state.playlist.clear();
        self.state.current_index = 0;
    }

    pub fn advance_to_next(&mut self) {
        if self.state.playlist.is_empty() {
            return;
        }
        if self.state.is_shuffling {
            self.state.current_index = self.pick_shuffled_index();
        } else if self.has_next() {
            self.state.current_index += 1;
        }
    }

    pub fn advance_to_previous(&mut self) {
        if self.has_previous() {
            self.state.current_index -= 1;
        }
    }

    /// Uniform pick among the other episodes; a single episode stays put.
    fn pick_shuffled_index(&mut self) -> usize {
        let len = self.state.playlist.len();
        if len <= 1 {
            return 0;
        }
        let offset = self.rng.random_range(1..len);
        (self.state.current_index + offset) % len
    }
}

impl Default for PlaybackStore {
    fn default() -> Self {
        Self::new()
    }
}
