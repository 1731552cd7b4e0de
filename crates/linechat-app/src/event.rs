//! Application input events.
//!
//! Events come from the keyboard, from the server connection and from the
//! idle timer.

use crate::KeyInput;

/// Events processed by the [`crate::App`] state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// One line received from the server, without its terminator.
    Line(String),

    /// The server closed the stream.
    Disconnected,

    /// Idle redraw.
    Tick,
}
