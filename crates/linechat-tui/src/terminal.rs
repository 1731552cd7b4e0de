//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait using crossterm for keyboard events and
//! ratatui for rendering.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use linechat_app::{App, Driver, KeyInput};
use linechat_client::SessionError;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::ui;

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Session setup failed.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Puts the terminal into raw mode on the alternate screen; the previous
/// state is restored by [`Driver::stop`] or on drop, whichever comes first.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    events: EventStream,
    restored: bool,
}

impl TerminalDriver {
    /// Take over the terminal.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, events: EventStream::new(), restored: false })
    }

    fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Translate a crossterm key press.
///
/// F9 cycles the mode, F3 shows the connection log, Ctrl-F/Ctrl-B move the
/// cursor and Ctrl-C acts like Esc.
pub fn convert_key(key: KeyEvent) -> Option<KeyInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('f') => Some(KeyInput::Right),
            KeyCode::Char('b') => Some(KeyInput::Left),
            KeyCode::Char('c') => Some(KeyInput::Esc),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(' ') => Some(KeyInput::Space),
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Tab => Some(KeyInput::Char('\t')),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Esc => Some(KeyInput::Esc),
        KeyCode::Left => Some(KeyInput::Left),
        KeyCode::Right => Some(KeyInput::Right),
        KeyCode::F(9) => Some(KeyInput::NextMode),
        KeyCode::F(3) => Some(KeyInput::ShowConnectionLog),
        _ => None,
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn next_key(&mut self) -> Result<Option<KeyInput>, Self::Error> {
        while let Some(event) = self.events.next().await {
            if let Event::Key(key) = event?
                && key.kind == KeyEventKind::Press
                && let Some(input) = convert_key(key)
            {
                return Ok(Some(input));
            }
        }
        Ok(None)
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| ui::render(frame, app))?;
        Ok(())
    }

    fn stop(&mut self) {
        self.restore();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.restore();
    }
}
