//! End-to-end player scenarios over the simulated media handle
//!
//! The tokio clock is paused, so the simulated handle's ticks run as fast as
//! the player can consume them.

use crate::test_utils::episode;
use podcastr::media::SimulatedHandle;
use podcastr::player::{Player, PlayerCommand, PlayerOptions, PlayerSnapshot, PlayerStateUpdate};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot};

#[cfg(test)]
mod player_integration_tests {
    use super::*;

    async fn full_state(commands: &mpsc::Sender<PlayerCommand>) -> PlayerSnapshot {
        let (tx, rx) = oneshot::channel();
        commands
            .send(PlayerCommand::GetFullState(tx))
            .await
            .expect("player should be running");
        rx.await.expect("player should answer")
    }

    async fn wait_for(
        updates: &mut broadcast::Receiver<PlayerStateUpdate>,
        mut wanted: impl FnMut(&PlayerStateUpdate) -> bool,
    ) {
        loop {
            match updates.recv().await {
                Ok(update) if wanted(&update) => return,
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => panic!("player stopped broadcasting"),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_playlist_plays_through_and_clears() {
        let episodes = vec![episode("first", 3), episode("second", 2)];
        let (media_tx, media_rx) = mpsc::unbounded_channel();
        let mut handle = SimulatedHandle::from_episodes(media_tx, &episodes);
        handle.start_clock(Duration::from_secs(1));

        let (mut player, commands) = Player::new(handle, media_rx, PlayerOptions::default());
        let mut updates = player.subscribe_state_updates();

        let driver = async move {
            commands
                .send(PlayerCommand::PlayFromList { episodes, index: 0 })
                .await
                .expect("send play");

            wait_for(&mut updates, |u| {
                matches!(u, PlayerStateUpdate::EpisodeChanged(Some(e)) if e.id == "second")
            })
            .await;
            let state = full_state(&commands).await;
            assert_eq!(state.playback.current_index, 1);
            assert!(state.playback.has_previous);
            assert!(!state.playback.has_next);

            wait_for(&mut updates, |u| matches!(u, PlayerStateUpdate::Stopped)).await;
            let state = full_state(&commands).await;
            assert!(state.playback.current_episode.is_none());
            assert_eq!(state.playback.current_index, 0);

            commands.send(PlayerCommand::Shutdown).await.expect("send shutdown");
        };

        let (_, result) = tokio::join!(
            player.run(),
            tokio::time::timeout(Duration::from_secs(60), driver)
        );
        assert!(result.is_ok(), "scenario timed out");
        assert!(player.store().playlist().is_empty());
        assert!(!player.store().is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_seek_and_pause_round_trip() {
        let episodes = vec![episode("long", 600)];
        let (media_tx, media_rx) = mpsc::unbounded_channel();
        let handle = SimulatedHandle::from_episodes(media_tx, &episodes);

        let (mut player, commands) = Player::new(handle, media_rx, PlayerOptions::default());
        let mut updates = player.subscribe_state_updates();

        let driver = async move {
            commands
                .send(PlayerCommand::PlaySingle(episodes[0].clone()))
                .await
                .expect("send play");
            wait_for(&mut updates, |u| matches!(u, PlayerStateUpdate::PlayingChanged(true))).await;

            commands
                .send(PlayerCommand::Seek { seconds: 120 })
                .await
                .expect("send seek");
            let state = full_state(&commands).await;
            assert_eq!(state.position.elapsed_seconds, 120);

            // Seeking past the end clamps to the duration
            commands
                .send(PlayerCommand::Seek { seconds: 9_999 })
                .await
                .expect("send seek");
            let state = full_state(&commands).await;
            assert_eq!(state.position.elapsed_seconds, 600);

            commands.send(PlayerCommand::TogglePlay).await.expect("send toggle");
            wait_for(&mut updates, |u| matches!(u, PlayerStateUpdate::PlayingChanged(false))).await;
            let state = full_state(&commands).await;
            assert!(!state.playback.is_playing);
            assert_eq!(state.playback.current_episode.map(|e| e.id), Some("long".to_string()));

            commands.send(PlayerCommand::Shutdown).await.expect("send shutdown");
        };

        let (_, result) = tokio::join!(
            player.run(),
            tokio::time::timeout(Duration::from_secs(60), driver)
        );
        assert!(result.is_ok(), "scenario timed out");
        assert!(!player.bridge().handle().is_playing());
    }
}
