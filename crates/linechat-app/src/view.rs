//! Text regions the frontend can draw.
//!
//! Every region answers the same three questions: how many lines it has,
//! what line `n` says, and what to call it.

use crate::{ChatLogs, EditBuffer, RingLog, RoomRegistry};

/// Which region fills the main pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Raw server lines.
    #[default]
    ConnectionLog,
    /// Room listing.
    RoomList,
    /// Messages or members of the current room.
    Chat,
}

/// A drawable block of lines.
#[derive(Debug, Clone, Copy)]
pub enum Region<'a> {
    /// The input line.
    Edit(&'a EditBuffer),
    /// A plain log, newest first.
    Log(&'a RingLog),
    /// One line per registry slot.
    RoomList(&'a RoomRegistry),
    /// The current room.
    Chat(&'a ChatLogs),
}

impl Region<'_> {
    /// Text of line `n`, `""` past the end.
    pub fn line(&self, n: usize) -> String {
        match self {
            Self::Edit(buffer) => {
                if n == 0 {
                    buffer.text().to_owned()
                } else {
                    String::new()
                }
            },
            Self::Log(log) => log.get(n).to_owned(),
            Self::RoomList(registry) => registry.line(n),
            Self::Chat(logs) => logs.line(n).to_owned(),
        }
    }

    /// Number of addressable lines.
    pub fn line_count(&self) -> usize {
        match self {
            Self::Edit(_) => 1,
            Self::Log(log) => log.capacity(),
            Self::RoomList(registry) => registry.capacity(),
            Self::Chat(logs) => logs.line_count(),
        }
    }

    /// Heading for the region's frame.
    pub fn title(&self) -> String {
        match self {
            Self::Edit(_) => "Input".to_owned(),
            Self::Log(_) => "Connection".to_owned(),
            Self::RoomList(_) => "Rooms".to_owned(),
            Self::Chat(logs) => match (logs.current_room(), logs.show_members()) {
                (None, _) => "Chat".to_owned(),
                (Some(room), false) => format!("Chat: room {room}"),
                (Some(room), true) => format!("Members: room {room}"),
            },
        }
    }
}
