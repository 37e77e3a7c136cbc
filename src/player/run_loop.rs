// src/player/run_loop.rs
use super::{LoopControl, Player, PLAYER_LOG_TARGET};
use crate::media::MediaHandle;
use tracing::{info, trace};

/// Runs the player's message processing loop.
pub async fn run_player_loop<H: MediaHandle>(player: &mut Player<H>) {
    info!(target: PLAYER_LOG_TARGET, "Player run loop started.");

    loop {
        tokio::select! {
            biased; // Check commands first

            command = player.command_rx.recv() => {
                let Some(command) = command else {
                    info!(target: PLAYER_LOG_TARGET, "Command channel closed. Exiting run loop.");
                    break;
                };
                trace!(target: PLAYER_LOG_TARGET, "Received command: {:?}", command);
                if player.apply_command(command) == LoopControl::Exit {
                    break;
                }
            }

            Some(event) = player.media_rx.recv() => {
                trace!(target: PLAYER_LOG_TARGET, "Received media event: {:?}", event);
                player.apply_media_event(event);
            }
        }
    }

    info!(target: PLAYER_LOG_TARGET, "Player run loop finished. Detaching media handle.");
    player.transition(|store| store.set_playing_state(false));
    player.bridge.detach();
    info!(target: PLAYER_LOG_TARGET, "Player task cleanup complete.");
}
