//! Tests for the command-line interface and the transport surface

#[cfg(test)]
mod tests {
    use super::super::*;
    use super::super::terminal::action_for_key;
    use super::super::transport::{ButtonState, PlayIcon, EMPTY_PLAYER_MESSAGE};
    use crate::episodes::Episode;
    use crate::media::PlaybackPosition;
    use crate::player::{PlaybackSnapshot, PlayerCommand, PlayerSnapshot};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn episode(id: &str, duration: u64) -> Episode {
        Episode {
            id: id.to_string(),
            title: format!("Episode {}", id),
            members: "Diego e Richard".to_string(),
            thumbnail: format!("https://example.com/{}.jpg", id),
            url: format!("https://example.com/{}.mp3", id),
            duration,
        }
    }

    fn snapshot(len: usize, index: usize, elapsed: u64) -> PlayerSnapshot {
        let episodes: Vec<Episode> = (0..len).map(|i| episode(&i.to_string(), 3600)).collect();
        PlayerSnapshot {
            playback: PlaybackSnapshot {
                episode_ids: episodes.iter().map(|e| e.id.clone()).collect(),
                current_index: index,
                current_episode: episodes.get(index).cloned(),
                is_playing: true,
                is_looping: false,
                is_shuffling: false,
                has_previous: index > 0,
                has_next: index + 1 < len,
            },
            position: PlaybackPosition {
                elapsed_seconds: elapsed,
                duration_seconds: Some(3600),
                metadata_loaded: true,
            },
        }
    }

    #[test]
    fn test_args_parsing() {
        use clap::CommandFactory;
        let app = Args::command();
        app.debug_assert();
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("1\n", 3).unwrap(), 0);
        assert_eq!(parse_selection(" 3 ", 3).unwrap(), 2);
        assert!(parse_selection("0", 3).is_err());
        assert!(parse_selection("4", 3).is_err());
        assert!(parse_selection("abc", 3).is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(65), "01:05");
        assert_eq!(format_duration(599), "09:59");
        assert_eq!(format_duration(3600), "01:00:00");
        assert_eq!(format_duration(3661), "01:01:01");
        assert_eq!(format_duration(36_000 + 59), "10:00:59");
    }

    #[test]
    fn test_scrub_inert_until_metadata_loads() {
        let mut pending = snapshot(2, 0, 0);
        pending.position = PlaybackPosition::default();
        let view = TransportView::from_snapshot(&pending);

        assert!(view.now_playing.is_some());
        assert!(view.play_pause.enabled);
        assert!(!view.scrub.enabled);
        assert!(view.command_for(TransportAction::SeekForward, 15).is_none());
        assert!(view.command_for(TransportAction::SeekBack, 15).is_none());
        assert_eq!(view.elapsed_label, "00:00");
    }

    #[test]
    fn test_empty_view() {
        let view = TransportView::from_snapshot(&PlayerSnapshot::default());

        assert!(view.now_playing.is_none());
        assert_eq!(view.elapsed_label, "00:00");
        assert_eq!(view.remaining_label, "00:00");
        assert!(!view.scrub.enabled);
        for button in [view.shuffle, view.previous, view.play_pause, view.next, view.repeat] {
            assert!(!button.enabled);
        }
        assert_eq!(view.play_icon, PlayIcon::Play);
        assert!(view.render_lines(80).iter().any(|line| line == EMPTY_PLAYER_MESSAGE));
    }

    #[test]
    fn test_loaded_view_labels_and_scrub() {
        let view = TransportView::from_snapshot(&snapshot(3, 1, 65));

        let now_playing = view.now_playing.as_ref().unwrap();
        assert_eq!(now_playing.title, "Episode 1");
        assert_eq!(view.elapsed_label, "01:05");
        assert_eq!(view.remaining_label, "58:55");
        assert_eq!(view.scrub.max, 3600);
        assert_eq!(view.scrub.value, 65);
        assert!(view.scrub.enabled);
        assert_eq!(view.play_icon, PlayIcon::Pause);
    }

    #[test]
    fn test_button_availability() {
        let first = TransportView::from_snapshot(&snapshot(3, 0, 0));
        assert!(!first.previous.enabled);
        assert!(first.next.enabled);
        assert!(first.shuffle.enabled);

        let last = TransportView::from_snapshot(&snapshot(3, 2, 0));
        assert!(last.previous.enabled);
        assert!(!last.next.enabled);

        let single = TransportView::from_snapshot(&snapshot(1, 0, 0));
        assert!(!single.shuffle.enabled);
        assert!(single.repeat.enabled);
        assert!(single.play_pause.enabled);
    }

    #[test]
    fn test_toggle_buttons_show_active() {
        let mut state = snapshot(3, 0, 0);
        state.playback.is_shuffling = true;
        state.playback.is_looping = true;
        state.playback.has_next = true;
        let view = TransportView::from_snapshot(&state);
        assert_eq!(view.shuffle, ButtonState { enabled: true, active: true });
        assert_eq!(view.repeat, ButtonState { enabled: true, active: true });
    }

    #[test]
    fn test_disabled_controls_issue_no_command() {
        let view = TransportView::from_snapshot(&snapshot(3, 0, 0));
        assert!(view.command_for(TransportAction::Previous, 15).is_none());
        assert!(matches!(view.command_for(TransportAction::Next, 15), Some(PlayerCommand::Next)));

        let empty = TransportView::from_snapshot(&PlayerSnapshot::default());
        assert!(empty.command_for(TransportAction::PlayPause, 15).is_none());
        assert!(empty.command_for(TransportAction::SeekForward, 15).is_none());
        assert!(matches!(empty.command_for(TransportAction::Quit, 15), Some(PlayerCommand::Shutdown)));
    }

    #[test]
    fn test_seek_commands_stay_in_bounds() {
        let start = TransportView::from_snapshot(&snapshot(1, 0, 5));
        assert!(matches!(start.command_for(TransportAction::SeekBack, 15), Some(PlayerCommand::Seek { seconds: 0 })));

        let end = TransportView::from_snapshot(&snapshot(1, 0, 3590));
        assert!(matches!(end.command_for(TransportAction::SeekForward, 15), Some(PlayerCommand::Seek { seconds: 3600 })));
    }

    #[test]
    fn test_key_map() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(action_for_key(&key(KeyCode::Char(' '))), Some(TransportAction::PlayPause));
        assert_eq!(action_for_key(&key(KeyCode::Right)), Some(TransportAction::SeekForward));
        assert_eq!(action_for_key(&key(KeyCode::Char('x'))), None);
        assert_eq!(
            action_for_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TransportAction::Quit)
        );
    }
}
