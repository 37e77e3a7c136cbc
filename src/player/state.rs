use crate::episodes::Episode;
use crate::media::PlaybackPosition;
use tokio::sync::oneshot;

/// Commands that can be sent to the Player task.
#[derive(Debug)]
pub enum PlayerCommand {
    PlaySingle(Episode),
    PlayFromList { episodes: Vec<Episode>, index: usize },
    TogglePlay,
    ToggleLoop,
    ToggleShuffle,
    Next,
    Previous,
    Seek { seconds: u64 },
    ClearPlaylist,
    GetFullState(oneshot::Sender<PlayerSnapshot>),
    Shutdown,
}

/// Mutable playback state, owned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub playlist: Vec<Episode>,
    pub current_index: usize,
    pub is_playing: bool,
    pub is_looping: bool,
    pub is_shuffling: bool,
}

/// Read-only view of the store, including derived flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackSnapshot {
    pub episode_ids: Vec<String>,
    pub current_index: usize,
    pub current_episode: Option<Episode>,
    pub is_playing: bool,
    pub is_looping: bool,
    pub is_shuffling: bool,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PlaybackSnapshot {
    pub fn playlist_len(&self) -> usize {
        self.episode_ids.len()
    }
}

/// Everything a view needs to render the player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub playback: PlaybackSnapshot,
    pub position: PlaybackPosition,
}

/// Updates broadcast by the Player task about its state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerStateUpdate {
    PlaylistChanged {
        episode_ids: Vec<String>,
        current_index: usize,
    },
    EpisodeChanged(Option<Episode>),
    PlayingChanged(bool),
    LoopingChanged(bool),
    ShufflingChanged(bool),
    Progress {
        episode_id: String,
        elapsed_seconds: u64,
    },
    Stopped,
}

/// Updates describing the move from `previous` to `next`, in render order.
pub fn diff_snapshots(previous: &PlaybackSnapshot, next: &PlaybackSnapshot) -> Vec<PlayerStateUpdate> {
    let mut updates = Vec::new();

    if previous.episode_ids != next.episode_ids || previous.current_index != next.current_index {
        updates.push(PlayerStateUpdate::PlaylistChanged {
            episode_ids: next.episode_ids.clone(),
            current_index: next.current_index,
        });
    }
    let previous_id = previous.current_episode.as_ref().map(|e| &e.id);
    let next_id = next.current_episode.as_ref().map(|e| &e.id);
    if previous_id != next_id {
        updates.push(PlayerStateUpdate::EpisodeChanged(next.current_episode.clone()));
    }
    if previous.is_playing != next.is_playing {
        updates.push(PlayerStateUpdate::PlayingChanged(next.is_playing));
    }
    if previous.is_looping != next.is_looping {
        updates.push(PlayerStateUpdate::LoopingChanged(next.is_looping));
    }
    if previous.is_shuffling != next.is_shuffling {
        updates.push(PlayerStateUpdate::ShufflingChanged(next.is_shuffling));
    }
    if !previous.episode_ids.is_empty() && next.episode_ids.is_empty() {
        updates.push(PlayerStateUpdate::Stopped);
    }
    updates
}
