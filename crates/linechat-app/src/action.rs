//! Application side-effects.
//!
//! [`AppAction`] values are produced by [`crate::App`] and carried out by the
//! event loop, in order.

use linechat_proto::ClientCommand;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Redraw.
    Render,

    /// Write a command to the server.
    Send(ClientCommand),

    /// Push the read and write deadlines forward.
    ResetDeadlines,

    /// End the session.
    Quit,
}
