//! Driver trait for abstracting terminal I/O.
//!
//! The [`Driver`] trait decouples the [`crate::EventLoop`] from the terminal
//! library. The production frontend reads crossterm events and draws with
//! ratatui; tests script keys and record renders.

use std::future::Future;

use linechat_client::SessionError;

use crate::{App, KeyInput};

/// Keyboard input and rendering for the event loop.
pub trait Driver: Send {
    /// Frontend error type. Session failures during setup convert into it.
    type Error: std::error::Error + From<SessionError> + Send + 'static;

    /// Wait for the next key the application understands.
    ///
    /// Returns `None` once input is closed. Must be cancel-safe: the event
    /// loop drops the future whenever another source is ready first.
    fn next_key(&mut self) -> impl Future<Output = Result<Option<KeyInput>, Self::Error>> + Send;

    /// Draw the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Release the terminal.
    fn stop(&mut self);
}
