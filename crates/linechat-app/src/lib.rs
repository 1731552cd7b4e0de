//! Application layer for linechat
//!
//! In-memory text structures, the mode-driven protocol state machine and the
//! event loop that ties keyboard, server connection and rendering together.
//!
//! # Components
//!
//! - [`EditBuffer`], [`RingLog`], [`RoomRegistry`], [`ChatLogs`]: text state
//! - [`App`]: state machine turning [`AppEvent`]s into [`AppAction`]s
//! - [`Region`]: what the frontend draws
//! - [`Driver`]: trait for terminal I/O
//! - [`EventLoop`]: session loop using a Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod chat_log;
mod driver;
mod edit;
mod event;
mod input;
mod mode;
mod ring_log;
mod rooms;
mod runtime;
mod view;

pub use action::AppAction;
pub use app::{App, CONNECTION_LOG_LINES};
pub use chat_log::{CHAT_LOG_LINES, ChatLogs};
pub use driver::Driver;
pub use edit::EditBuffer;
pub use event::AppEvent;
pub use input::KeyInput;
pub use mode::Mode;
pub use ring_log::RingLog;
pub use rooms::{ROOM_CAPACITY, RoomEntry, RoomRegistry};
pub use runtime::{EventLoop, IDLE_REDRAW};
pub use view::{Region, View};
