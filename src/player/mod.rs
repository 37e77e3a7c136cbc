//! Playback coordination: the state store and the task that owns it.

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, instrument, trace};

use crate::media::{MediaBridge, MediaEvent, MediaHandle};

mod command_handler;
mod run_loop;
mod state;
mod store;

pub use state::{
    diff_snapshots, PlaybackSnapshot, PlaybackState, PlayerCommand, PlayerSnapshot, PlayerStateUpdate,
};
pub use store::PlaybackStore;

const PLAYER_LOG_TARGET: &str = "podcastr::player";

/// Tunables for a [`Player`].
#[derive(Debug, Clone)]
pub struct PlayerOptions {
    /// Start playing as soon as a new episode is bound
    pub autoplay: bool,
    pub state_update_capacity: usize,
    pub command_buffer_size: usize,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        PlayerOptions {
            autoplay: true,
            state_update_capacity: 64,
            command_buffer_size: 32,
        }
    }
}

/// Whether the run loop keeps going after a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Owns the playback store and the media bridge, and applies commands and
/// media events to them one at a time.
pub struct Player<H: MediaHandle> {
    store: PlaybackStore,
    bridge: MediaBridge<H>,

    // --- Communication ---
    command_rx: mpsc::Receiver<PlayerCommand>,
    media_rx: mpsc::UnboundedReceiver<MediaEvent>,
    state_update_tx: broadcast::Sender<PlayerStateUpdate>,
}

impl<H: MediaHandle> Player<H> {
    /// Creates a new Player and the sender for its command channel.
    ///
    /// `media_rx` must be the receiving end of the channel `handle` emits on.
    pub fn new(
        handle: H,
        media_rx: mpsc::UnboundedReceiver<MediaEvent>,
        options: PlayerOptions,
    ) -> (Self, mpsc::Sender<PlayerCommand>) {
        Self::with_store(PlaybackStore::new(), handle, media_rx, options)
    }

    /// Like [`Player::new`], with a caller-provided store.
    pub fn with_store(
        store: PlaybackStore,
        handle: H,
        media_rx: mpsc::UnboundedReceiver<MediaEvent>,
        options: PlayerOptions,
    ) -> (Self, mpsc::Sender<PlayerCommand>) {
        let (command_tx, command_rx) = mpsc::channel(options.command_buffer_size.max(1));
        let (state_update_tx, _) = broadcast::channel(options.state_update_capacity.max(1));

        let player = Player {
            store,
            bridge: MediaBridge::new(handle, options.autoplay),
            command_rx,
            media_rx,
            state_update_tx,
        };
        (player, command_tx)
    }

    /// Subscribes to player state updates.
    pub fn subscribe_state_updates(&self) -> broadcast::Receiver<PlayerStateUpdate> {
        self.state_update_tx.subscribe()
    }

    pub fn store(&self) -> &PlaybackStore {
        &self.store
    }

    pub fn bridge(&self) -> &MediaBridge<H> {
        &self.bridge
    }

    /// Constructs the full current state object.
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            playback: self.store.snapshot(),
            position: self.bridge.position().clone(),
        }
    }

    /// Applies one command, reconciles the media handle and broadcasts the result.
    pub fn apply_command(&mut self, command: PlayerCommand) -> LoopControl {
        command_handler::dispatch(self, command)
    }

    /// Applies one media handle event.
    #[instrument(skip(self), fields(generation = event.generation))]
    pub fn apply_media_event(&mut self, event: MediaEvent) {
        let previous = self.snapshot();
        if !self.bridge.handle_event(event, &mut self.store) {
            return;
        }
        let next = self.store.snapshot();
        self.bridge.reconcile(&previous.playback, &next);
        self.broadcast_changes(&previous, &next);
    }

    /// Runs the player's message loop until shutdown. Should be awaited on the
    /// same task as the rest of the UI.
    pub async fn run(&mut self) {
        run_loop::run_player_loop(self).await;
    }

    // --- Private Helper Methods ---

    /// Runs a store mutation, then lets the bridge react to it.
    fn transition(&mut self, mutate: impl FnOnce(&mut PlaybackStore)) {
        let previous = self.snapshot();
        mutate(&mut self.store);
        let next = self.store.snapshot();
        self.bridge.reconcile(&previous.playback, &next);
        self.broadcast_changes(&previous, &next);
    }

    fn broadcast_changes(&self, previous: &PlayerSnapshot, next: &PlaybackSnapshot) {
        for update in diff_snapshots(&previous.playback, next) {
            self.broadcast_update(update);
        }
        let position = self.bridge.position();
        if position.elapsed_seconds != previous.position.elapsed_seconds {
            if let Some(episode) = &next.current_episode {
                self.broadcast_update(PlayerStateUpdate::Progress {
                    episode_id: episode.id.clone(),
                    elapsed_seconds: position.elapsed_seconds,
                });
            }
        }
    }

    /// Sends a state update via the broadcast channel, logging errors.
    fn broadcast_update(&self, update: PlayerStateUpdate) {
        trace!(target: PLAYER_LOG_TARGET, "Broadcasting state update: {:?}", update);
        if self.state_update_tx.send(update.clone()).is_err() {
            // No receivers is normal before the view subscribes
            debug!(target: PLAYER_LOG_TARGET, "No active listeners for state update: {:?}", update);
        }
    }
}
