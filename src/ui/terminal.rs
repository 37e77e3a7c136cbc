//! Raw-mode terminal rendering of the transport surface.

use std::error::Error;
use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue, style::Print};
use futures::StreamExt;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info};

use crate::player::{PlayerCommand, PlayerSnapshot, PlayerStateUpdate};
use crate::ui::transport::{TransportAction, TransportView};

const LOG_TARGET: &str = "podcastr::ui::terminal";

/// Maps a key press to a transport action.
pub fn action_for_key(key: &KeyEvent) -> Option<TransportAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(TransportAction::Quit);
    }
    match key.code {
        KeyCode::Char(' ') => Some(TransportAction::PlayPause),
        KeyCode::Char('n') => Some(TransportAction::Next),
        KeyCode::Char('p') => Some(TransportAction::Previous),
        KeyCode::Char('s') => Some(TransportAction::Shuffle),
        KeyCode::Char('l') => Some(TransportAction::Loop),
        KeyCode::Left => Some(TransportAction::SeekBack),
        KeyCode::Right => Some(TransportAction::SeekForward),
        KeyCode::Char('q') | KeyCode::Esc => Some(TransportAction::Quit),
        _ => None,
    }
}

/// Restores the terminal when dropped, including on error paths.
struct TerminalGuard {
    stdout: Stdout,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Ok(TerminalGuard { stdout })
    }

    fn draw(&mut self, view: &TransportView) -> io::Result<()> {
        let (width, _) = terminal::size().unwrap_or((80, 24));
        for (row, line) in view.render_lines(width as usize).iter().enumerate() {
            queue!(
                self.stdout,
                MoveTo(0, row as u16),
                Clear(ClearType::CurrentLine),
                Print(line)
            )?;
        }
        self.stdout.flush()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

async fn fetch_snapshot(commands: &mpsc::Sender<PlayerCommand>) -> Option<PlayerSnapshot> {
    let (responder, receiver) = oneshot::channel();
    commands.send(PlayerCommand::GetFullState(responder)).await.ok()?;
    receiver.await.ok()
}

/// Drives the transport surface until the listener quits or the player stops.
pub async fn run_transport(
    commands: mpsc::Sender<PlayerCommand>,
    mut updates: broadcast::Receiver<PlayerStateUpdate>,
    seek_step: u64,
) -> Result<(), Box<dyn Error>> {
    let mut guard = TerminalGuard::enter()?;
    let mut keys = EventStream::new();

    let Some(snapshot) = fetch_snapshot(&commands).await else {
        return Ok(());
    };
    let mut view = TransportView::from_snapshot(&snapshot);
    guard.draw(&view)?;

    loop {
        tokio::select! {
            maybe_event = keys.next() => {
                let key = match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => key,
                    Some(Ok(Event::Resize(_, _))) => {
                        guard.draw(&view)?;
                        continue;
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                };
                let Some(action) = action_for_key(&key) else { continue };
                debug!(target: LOG_TARGET, "Transport action {:?}", action);
                match view.command_for(action, seek_step) {
                    Some(PlayerCommand::Shutdown) => {
                        info!(target: LOG_TARGET, "Listener quit.");
                        let _ = commands.send(PlayerCommand::Shutdown).await;
                        break;
                    }
                    Some(command) => {
                        if commands.send(command).await.is_err() {
                            break;
                        }
                    }
                    None => debug!(target: LOG_TARGET, "Ignoring {:?}: control disabled.", action),
                }
            }

            update = updates.recv() => {
                match update {
                    Ok(_) | Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                }
                let Some(snapshot) = fetch_snapshot(&commands).await else { break };
                view = TransportView::from_snapshot(&snapshot);
                guard.draw(&view)?;
            }
        }
    }

    Ok(())
}
