//! Client to server commands.

use std::fmt;

use crate::RoomId;

/// A command written by the client.
///
/// [`fmt::Display`] renders the wire form without the line terminator; the
/// session appends [`crate::LINE_TERMINATOR`] when writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// `LOGIN <user>`
    Login {
        /// Account name.
        user: String,
    },
    /// `SET_INTRO <text>`
    SetIntro(String),
    /// `SET_LEVEL <text>`
    SetLevel(String),
    /// `CLIENT_INFO <text>`
    ClientInfo(String),
    /// `SET_ID <id>`
    SetId(u64),
    /// `PING -1`, the heartbeat.
    Ping,
    /// `OPEN_ROOM <id>`
    OpenRoom(RoomId),
    /// `CLOSE_ROOM <id>`
    CloseRoom(RoomId),
    /// `SHOUT <roomId> <text>`
    Shout {
        /// Target room.
        room_id: RoomId,
        /// Message text, sent as-is.
        text: String,
    },
    /// `LOGOUT`
    Logout,
    /// `OK SVR_PING`, the reply to a server ping.
    AckServerPing,
    /// A line typed in direct mode, sent verbatim.
    Direct(String),
}

impl fmt::Display for ClientCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login { user } => write!(f, "LOGIN {user}"),
            Self::SetIntro(text) => write!(f, "SET_INTRO {text}"),
            Self::SetLevel(text) => write!(f, "SET_LEVEL {text}"),
            Self::ClientInfo(text) => write!(f, "CLIENT_INFO {text}"),
            Self::SetId(id) => write!(f, "SET_ID {id}"),
            Self::Ping => f.write_str("PING -1"),
            Self::OpenRoom(room_id) => write!(f, "OPEN_ROOM {room_id}"),
            Self::CloseRoom(room_id) => write!(f, "CLOSE_ROOM {room_id}"),
            Self::Shout { room_id, text } => write!(f, "SHOUT {room_id} {text}"),
            Self::Logout => f.write_str("LOGOUT"),
            Self::AckServerPing => f.write_str("OK SVR_PING"),
            Self::Direct(text) => f.write_str(text),
        }
    }
}
