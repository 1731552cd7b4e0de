//! Wire protocol for linechat
//!
//! The protocol is plain text: every message is one line terminated by
//! `\r\n`, fields are separated by single spaces and the first token is the
//! command or response keyword.
//!
//! # Components
//!
//! - [`ClientCommand`]: commands the client writes to the server
//! - [`ServerEvent`]: typed events decoded from server lines
//! - [`LineBuffer`], [`next_line`]: split complete lines off a receive buffer

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod command;
mod errors;
mod event;
mod line;

pub use command::ClientCommand;
pub use errors::{DecodeError, LineTooLong};
pub use event::{OkReply, ServerEvent};
pub use line::{LINE_TERMINATOR, LineBuffer, next_line};

/// Numeric room identifier assigned by the server.
pub type RoomId = u64;
