//! Transport surface: what the player bar shows and which controls are live.

use crate::player::{PlayerCommand, PlayerSnapshot};
use crate::ui::time::format_duration;

pub const EMPTY_PLAYER_MESSAGE: &str = "Select a podcast to listen to";

/// Actions a listener can take from the transport surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportAction {
    Shuffle,
    Previous,
    PlayPause,
    Next,
    Loop,
    SeekBack,
    SeekForward,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub enabled: bool,
    pub active: bool,
}

impl ButtonState {
    fn new(enabled: bool) -> Self {
        ButtonState { enabled, active: false }
    }

    fn toggle(enabled: bool, active: bool) -> Self {
        ButtonState { enabled, active }
    }
}

/// The scrub bar, bounded `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrubControl {
    pub max: u64,
    pub value: u64,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub thumbnail: String,
    pub title: String,
    pub members: String,
}

/// Everything the player bar renders, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportView {
    pub now_playing: Option<NowPlaying>,
    pub elapsed_label: String,
    pub remaining_label: String,
    pub scrub: ScrubControl,
    pub shuffle: ButtonState,
    pub previous: ButtonState,
    pub play_pause: ButtonState,
    pub play_icon: PlayIcon,
    pub next: ButtonState,
    pub repeat: ButtonState,
}

impl TransportView {
    pub fn from_snapshot(snapshot: &PlayerSnapshot) -> Self {
        let playback = &snapshot.playback;
        let loaded = playback.current_episode.is_some();

        let (now_playing, duration) = match &playback.current_episode {
            Some(episode) => (
                Some(NowPlaying {
                    thumbnail: episode.thumbnail.clone(),
                    title: episode.title.clone(),
                    members: episode.members.clone(),
                }),
                episode.duration,
            ),
            None => (None, 0),
        };
        let elapsed = if loaded { snapshot.position.elapsed_seconds.min(duration) } else { 0 };

        TransportView {
            now_playing,
            elapsed_label: format_duration(elapsed),
            remaining_label: format_duration(duration.saturating_sub(elapsed)),
            scrub: ScrubControl {
                max: duration,
                value: elapsed,
                enabled: loaded && snapshot.position.metadata_loaded,
            },
            shuffle: ButtonState::toggle(loaded && playback.playlist_len() > 1, playback.is_shuffling),
            previous: ButtonState::new(loaded && playback.has_previous),
            play_pause: ButtonState::new(loaded),
            play_icon: if playback.is_playing { PlayIcon::Pause } else { PlayIcon::Play },
            next: ButtonState::new(loaded && playback.has_next),
            repeat: ButtonState::toggle(loaded, playback.is_looping),
        }
    }

    /// The command an action issues, or `None` when its control is disabled.
    pub fn command_for(&self, action: TransportAction, seek_step: u64) -> Option<PlayerCommand> {
        match action {
            TransportAction::Shuffle => self.shuffle.enabled.then_some(PlayerCommand::ToggleShuffle),
            TransportAction::Previous => self.previous.enabled.then_some(PlayerCommand::Previous),
            TransportAction::PlayPause => self.play_pause.enabled.then_some(PlayerCommand::TogglePlay),
            TransportAction::Next => self.next.enabled.then_some(PlayerCommand::Next),
            TransportAction::Loop => self.repeat.enabled.then_some(PlayerCommand::ToggleLoop),
            TransportAction::SeekBack => self.scrub.enabled.then(|| PlayerCommand::Seek {
                seconds: self.scrub.value.saturating_sub(seek_step),
            }),
            TransportAction::SeekForward => self.scrub.enabled.then(|| PlayerCommand::Seek {
                seconds: (self.scrub.value + seek_step).min(self.scrub.max),
            }),
            TransportAction::Quit => Some(PlayerCommand::Shutdown),
        }
    }

    /// Text rendering of the player bar, one entry per line.
    pub fn render_lines(&self, width: usize) -> Vec<String> {
        let mut lines = vec!["Now playing".to_string(), String::new()];

        match &self.now_playing {
            Some(episode) => {
                lines.push(episode.title.clone());
                lines.push(episode.members.clone());
                lines.push(episode.thumbnail.clone());
            }
            None => {
                lines.push(EMPTY_PLAYER_MESSAGE.to_string());
                lines.push(String::new());
                lines.push(String::new());
            }
        }
        lines.push(String::new());

        let bar_width = width.saturating_sub(self.elapsed_label.len() + self.remaining_label.len() + 4).max(10);
        lines.push(format!(
            "{} [{}] {}",
            self.elapsed_label,
            self.render_bar(bar_width),
            self.remaining_label
        ));
        lines.push(String::new());

        let play_label = match self.play_icon {
            PlayIcon::Play => "play",
            PlayIcon::Pause => "pause",
        };
        lines.push(
            [
                render_button("s", "shuffle", self.shuffle),
                render_button("p", "prev", self.previous),
                render_button("space", play_label, self.play_pause),
                render_button("n", "next", self.next),
                render_button("l", "loop", self.repeat),
            ]
            .join("  "),
        );
        lines.push("←/→ seek   q quit".to_string());
        lines
    }

    fn render_bar(&self, width: usize) -> String {
        if !self.scrub.enabled || self.scrub.max == 0 {
            return "-".repeat(width);
        }
        let filled = ((self.scrub.value as u128 * width as u128) / self.scrub.max as u128) as usize;
        format!("{}{}", "=".repeat(filled.min(width)), " ".repeat(width - filled.min(width)))
    }
}

fn render_button(key: &str, label: &str, state: ButtonState) -> String {
    let text = format!("{} {}", key, label);
    if !state.enabled {
        format!("({})", text)
    } else if state.active {
        format!("[*{}]", text)
    } else {
        format!("[{}]", text)
    }
}
