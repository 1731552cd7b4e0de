//! Server to client events.
//!
//! Every server line is decoded independently. The first token selects the
//! event kind; a line that cannot be decoded yields a [`DecodeError`] and is
//! dropped by the caller.

use crate::{DecodeError, RoomId};

/// Subcommand acknowledged by an `OK` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OkReply {
    /// `OK PING`: heartbeat acknowledged.
    Ping,
    /// `OK OPEN_ROOM <id>`: we entered the room.
    OpenRoom(RoomId),
    /// `OK ADD_ROOM <id>`: a room we requested was created.
    AddRoom(RoomId),
    /// `OK CLOSE_ROOM <id>`: we left the room.
    CloseRoom(RoomId),
    /// Any other acknowledgement (`OK LOGIN`, `OK SET_ID`, ...).
    Other(String),
}

/// A decoded server message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// `OK <subcommand> [...]`
    Ok(OkReply),
    /// `MESSAGE <roomId> <words...>`
    Message {
        /// Room the message was posted to.
        room_id: RoomId,
        /// Everything after the room id, verbatim.
        text: String,
    },
    /// `SVR_PING`: the server wants an `OK SVR_PING` back.
    ServerPing,
    /// `ROOM_ADDED <id> <owner> <unused> <name>`
    RoomAdded {
        /// New room id.
        room_id: RoomId,
        /// Owner's user name.
        owner: String,
        /// Display name.
        name: String,
    },
    /// `ROOM_REMOVED <id>`
    RoomRemoved {
        /// Removed room id.
        room_id: RoomId,
    },
    /// `ENTER <roomId> <user>`
    Enter {
        /// Room entered.
        room_id: RoomId,
        /// User who entered.
        user: String,
    },
    /// `LEAVE <roomId> <user>`
    Leave {
        /// Room left.
        room_id: RoomId,
        /// User who left.
        user: String,
    },
    /// `USERS <roomId> <user:user:...>`
    Users {
        /// Room the roster belongs to.
        room_id: RoomId,
        /// Members in server order.
        users: Vec<String>,
    },
    /// Literal `quit`. Also synthesized locally when the stream closes.
    Quit,
}

impl ServerEvent {
    /// Decode one line (without its terminator).
    pub fn decode(line: &str) -> Result<Self, DecodeError> {
        let line = line.trim_end_matches(['\r', '\n']).trim_start();
        let (keyword, rest) = split_token(line);

        match keyword {
            "" => Err(DecodeError::Empty),
            "quit" => Ok(Self::Quit),
            "OK" => decode_ok(rest).map(Self::Ok),
            "SVR_PING" => Ok(Self::ServerPing),
            "MESSAGE" => {
                let (id, text) = split_token(rest);
                Ok(Self::Message { room_id: parse_id("MESSAGE", id)?, text: text.to_string() })
            },
            "ROOM_ADDED" => {
                let (id, rest) = split_token(rest);
                let room_id = parse_id("ROOM_ADDED", id)?;
                let (owner, rest) = split_token(rest);
                let (_unused, name) = split_token(rest);
                let owner = required("ROOM_ADDED", "owner", owner)?;
                let name = required("ROOM_ADDED", "name", name.trim())?;
                Ok(Self::RoomAdded { room_id, owner, name })
            },
            "ROOM_REMOVED" => {
                let (id, _) = split_token(rest);
                Ok(Self::RoomRemoved { room_id: parse_id("ROOM_REMOVED", id)? })
            },
            "ENTER" => {
                let (room_id, user) = room_and_user("ENTER", rest)?;
                Ok(Self::Enter { room_id, user })
            },
            "LEAVE" => {
                let (room_id, user) = room_and_user("LEAVE", rest)?;
                Ok(Self::Leave { room_id, user })
            },
            "USERS" => {
                let (id, rest) = split_token(rest);
                let room_id = parse_id("USERS", id)?;
                let (list, _) = split_token(rest);
                let users =
                    list.split(':').filter(|name| !name.is_empty()).map(str::to_string).collect();
                Ok(Self::Users { room_id, users })
            },
            other => Err(DecodeError::UnknownCommand(other.to_string())),
        }
    }
}

fn decode_ok(rest: &str) -> Result<OkReply, DecodeError> {
    let (subcommand, rest) = split_token(rest);
    let (id, _) = split_token(rest);

    match subcommand {
        "" => Err(DecodeError::MissingField { command: "OK", field: "subcommand" }),
        "PING" => Ok(OkReply::Ping),
        "OPEN_ROOM" => parse_id("OK OPEN_ROOM", id).map(OkReply::OpenRoom),
        "ADD_ROOM" => parse_id("OK ADD_ROOM", id).map(OkReply::AddRoom),
        "CLOSE_ROOM" => parse_id("OK CLOSE_ROOM", id).map(OkReply::CloseRoom),
        other => Ok(OkReply::Other(other.to_string())),
    }
}

fn room_and_user(command: &'static str, rest: &str) -> Result<(RoomId, String), DecodeError> {
    let (id, rest) = split_token(rest);
    let room_id = parse_id(command, id)?;
    let (user, _) = split_token(rest);
    Ok((room_id, required(command, "user", user)?))
}

/// Split off the first space-separated token.
fn split_token(s: &str) -> (&str, &str) {
    s.split_once(' ').unwrap_or((s, ""))
}

fn required(command: &'static str, field: &'static str, value: &str) -> Result<String, DecodeError> {
    if value.is_empty() {
        return Err(DecodeError::MissingField { command, field });
    }
    Ok(value.to_string())
}

fn parse_id(command: &'static str, token: &str) -> Result<RoomId, DecodeError> {
    if token.is_empty() {
        return Err(DecodeError::MissingField { command, field: "room id" });
    }
    token.parse().map_err(|_| DecodeError::InvalidId { command, value: token.to_string() })
}
