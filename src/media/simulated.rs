//! Clock-driven media handle that plays episodes without producing audio.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::episodes::Episode;
use crate::media::handle::{Generation, MediaEvent, MediaEventKind, MediaHandle};
use crate::media::MediaError;

const LOG_TARGET: &str = "podcastr::media::simulated";

struct SimulatedState {
    events: mpsc::UnboundedSender<MediaEvent>,
    durations: HashMap<String, f64>,
    src: Option<String>,
    generation: Generation,
    duration: Option<f64>,
    current_time: f64,
    playing: bool,
    looping: bool,
    detached: bool,
}

impl SimulatedState {
    fn emit(&self, kind: MediaEventKind) {
        if self.detached {
            return;
        }
        trace!(target: LOG_TARGET, "Emitting {:?} for generation {}", kind, self.generation);
        // A closed receiver just means the player is gone
        let _ = self.events.send(MediaEvent::new(self.generation, kind));
    }

    fn advance(&mut self, seconds: f64) {
        if !self.playing || self.src.is_none() {
            return;
        }
        self.current_time += seconds;

        let Some(duration) = self.duration else {
            self.emit(MediaEventKind::TimeUpdate { current_time: self.current_time });
            return;
        };

        if self.current_time < duration {
            self.emit(MediaEventKind::TimeUpdate { current_time: self.current_time });
        } else if self.looping {
            self.current_time = 0.0;
            self.emit(MediaEventKind::TimeUpdate { current_time: 0.0 });
        } else {
            self.current_time = duration;
            self.playing = false;
            self.emit(MediaEventKind::TimeUpdate { current_time: duration });
            self.emit(MediaEventKind::Pause);
            self.emit(MediaEventKind::Ended);
        }
    }
}

/// A [`MediaHandle`] that advances a virtual clock instead of decoding audio.
///
/// Durations are looked up by source URL. A source with no known duration never
/// reports metadata and refuses to play, like a resource that never loads.
pub struct SimulatedHandle {
    state: Arc<Mutex<SimulatedState>>,
    clock: Option<JoinHandle<()>>,
}

impl SimulatedHandle {
    pub fn new(events: mpsc::UnboundedSender<MediaEvent>, durations: HashMap<String, f64>) -> Self {
        SimulatedHandle {
            state: Arc::new(Mutex::new(SimulatedState {
                events,
                durations,
                src: None,
                generation: 0,
                duration: None,
                current_time: 0.0,
                playing: false,
                looping: false,
                detached: false,
            })),
            clock: None,
        }
    }

    /// Builds a handle that knows the duration of every given episode.
    pub fn from_episodes(events: mpsc::UnboundedSender<MediaEvent>, episodes: &[Episode]) -> Self {
        let durations = episodes
            .iter()
            .map(|e| (e.url.clone(), e.duration as f64))
            .collect();
        Self::new(events, durations)
    }

    /// Spawns a task advancing the clock in real time, one tick per `interval`.
    pub fn start_clock(&mut self, interval: StdDuration) {
        if self.clock.is_some() {
            return;
        }
        let state = self.state.clone();
        self.clock = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let keep_running = match state.lock() {
                    Ok(mut guard) if !guard.detached => {
                        guard.advance(interval.as_secs_f64());
                        true
                    }
                    _ => false,
                };
                if !keep_running {
                    break;
                }
            }
        }));
        debug!(target: LOG_TARGET, "Simulated clock started ({:?} per tick).", interval);
    }

    /// Advances the virtual clock by `seconds` of playback.
    pub fn advance(&self, seconds: f64) {
        self.with_state(|state| state.advance(seconds));
    }

    pub fn is_playing(&self) -> bool {
        self.with_state(|state| state.playing)
    }

    pub fn current_time(&self) -> f64 {
        self.with_state(|state| state.current_time)
    }

    pub fn is_looping(&self) -> bool {
        self.with_state(|state| state.looping)
    }

    pub fn src(&self) -> Option<String> {
        self.with_state(|state| state.src.clone())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut SimulatedState) -> T) -> T {
        // The state holds no invariants a panicking holder could break
        let mut guard = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}

impl MediaHandle for SimulatedHandle {
    fn set_src(&mut self, url: &str, generation: Generation) -> Result<(), MediaError> {
        self.with_state(|state| {
            if state.detached {
                return Err(MediaError::InvalidState("handle is detached".to_string()));
            }
            state.src = Some(url.to_string());
            state.generation = generation;
            state.current_time = 0.0;
            state.playing = false;
            state.duration = state.durations.get(url).copied();
            match state.duration {
                Some(duration) => state.emit(MediaEventKind::LoadedMetadata { duration }),
                None => debug!(target: LOG_TARGET, "No metadata for {}; source will not load.", url),
            }
            Ok(())
        })
    }

    fn play(&mut self) -> Result<(), MediaError> {
        self.with_state(|state| {
            let Some(src) = state.src.as_ref() else {
                return Err(MediaError::InvalidState("no source bound".to_string()));
            };
            if state.duration.is_none() {
                return Err(MediaError::Unavailable(src.clone()));
            }
            if !state.playing {
                state.playing = true;
                state.emit(MediaEventKind::Play);
            }
            Ok(())
        })
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        self.with_state(|state| {
            if state.playing {
                state.playing = false;
                state.emit(MediaEventKind::Pause);
            }
            Ok(())
        })
    }

    fn set_current_time(&mut self, seconds: f64) -> Result<(), MediaError> {
        self.with_state(|state| {
            if state.src.is_none() {
                return Err(MediaError::InvalidState("no source bound".to_string()));
            }
            let upper = state.duration.unwrap_or(f64::MAX);
            state.current_time = seconds.clamp(0.0, upper);
            state.emit(MediaEventKind::TimeUpdate { current_time: state.current_time });
            Ok(())
        })
    }

    fn set_loop(&mut self, looping: bool) -> Result<(), MediaError> {
        self.with_state(|state| state.looping = looping);
        Ok(())
    }

    fn unload(&mut self) -> Result<(), MediaError> {
        self.with_state(|state| {
            state.src = None;
            state.duration = None;
            state.current_time = 0.0;
            state.playing = false;
        });
        Ok(())
    }

    fn detach(&mut self) {
        self.with_state(|state| {
            state.detached = true;
            state.playing = false;
            state.src = None;
        });
        if let Some(clock) = self.clock.take() {
            clock.abort();
        }
    }
}

impl Drop for SimulatedHandle {
    fn drop(&mut self) {
        self.detach();
    }
}
