use super::{LoopControl, Player, PlayerCommand, PlayerStateUpdate, PLAYER_LOG_TARGET};
use crate::episodes::Episode;
use crate::media::MediaHandle;
use tracing::{info, instrument, warn};

/// Routes one command to its handler.
pub(super) fn dispatch<H: MediaHandle>(player: &mut Player<H>, command: PlayerCommand) -> LoopControl {
    match command {
        PlayerCommand::PlaySingle(episode) => handle_play_single(player, episode),
        PlayerCommand::PlayFromList { episodes, index } => handle_play_from_list(player, episodes, index),
        PlayerCommand::TogglePlay => player.transition(|store| store.toggle_play()),
        PlayerCommand::ToggleLoop => player.transition(|store| store.toggle_loop()),
        PlayerCommand::ToggleShuffle => player.transition(|store| store.toggle_shuffle()),
        PlayerCommand::Next => handle_next(player),
        PlayerCommand::Previous => handle_previous(player),
        PlayerCommand::Seek { seconds } => handle_seek(player, seconds),
        PlayerCommand::ClearPlaylist => handle_clear_playlist(player),
        PlayerCommand::GetFullState(responder) => {
            // Receiver may have given up waiting
            let _ = responder.send(player.snapshot());
        }
        PlayerCommand::Shutdown => {
            info!(target: PLAYER_LOG_TARGET, "Shutdown command received.");
            return LoopControl::Exit;
        }
    }
    LoopControl::Continue
}

#[instrument(skip(player, episode), fields(episode_id = %episode.id))]
fn handle_play_single<H: MediaHandle>(player: &mut Player<H>, episode: Episode) {
    info!(target: PLAYER_LOG_TARGET, "Playing single episode '{}'.", episode.title);
    player.transition(|store| store.play_single(episode));
}

#[instrument(skip(player, episodes), fields(episode_count = episodes.len(), index = index))]
fn handle_play_from_list<H: MediaHandle>(player: &mut Player<H>, episodes: Vec<Episode>, index: usize) {
    if index >= episodes.len() {
        // Callers validate selections; a bad index here is a bug upstream
        warn!(target: PLAYER_LOG_TARGET, "PlayFromList: index {} out of range for {} episodes, ignoring.", index, episodes.len());
        return;
    }
    info!(target: PLAYER_LOG_TARGET, "Playing from list of {} episodes, starting at index {}.", episodes.len(), index);
    player.transition(|store| store.play_from_list(episodes, index));
}

#[instrument(skip(player))]
fn handle_next<H: MediaHandle>(player: &mut Player<H>) {
    if player.store.playlist().is_empty() {
        info!(target: PLAYER_LOG_TARGET, "Next: playlist is empty.");
        return;
    }
    if !player.store.has_next() {
        info!(target: PLAYER_LOG_TARGET, "Next: already at end of playlist.");
        return;
    }
    player.transition(|store| store.advance_to_next());
}

#[instrument(skip(player))]
fn handle_previous<H: MediaHandle>(player: &mut Player<H>) {
    if !player.store.has_previous() {
        info!(target: PLAYER_LOG_TARGET, "Previous: already at start of playlist.");
        return;
    }
    player.transition(|store| store.advance_to_previous());
}

#[instrument(skip(player))]
fn handle_seek<H: MediaHandle>(player: &mut Player<H>, seconds: u64) {
    let Some(episode) = player.store.current_episode() else {
        warn!(target: PLAYER_LOG_TARGET, "Seek: no episode loaded.");
        return;
    };
    let position = player.bridge.position();
    if !position.metadata_loaded {
        warn!(target: PLAYER_LOG_TARGET, "Seek: metadata for '{}' not loaded yet, ignoring.", episode.id);
        return;
    }
    let episode_id = episode.id.clone();
    let duration = position.duration_seconds.unwrap_or(episode.duration);
    let target = seconds.min(duration);

    player.bridge.seek(target);
    player.broadcast_update(PlayerStateUpdate::Progress {
        episode_id,
        elapsed_seconds: player.bridge.position().elapsed_seconds,
    });
}

#[instrument(skip(player))]
fn handle_clear_playlist<H: MediaHandle>(player: &mut Player<H>) {
    info!(target: PLAYER_LOG_TARGET, "Clearing playlist.");
    player.transition(|store| store.clear_playback_state());
}
