//! Terminal UI for linechat
//!
//! A thin shell over [`linechat_app::Driver`] that provides terminal I/O,
//! plus the process plumbing around it: command-line configuration and the
//! session log file. All session logic lives in
//! [`linechat_app::EventLoop`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod logging;
pub mod terminal;
pub mod ui;

pub use config::{Args, ClientConfig, ConfigError};
pub use linechat_app::{App, Driver, EventLoop, KeyInput};
pub use terminal::{TerminalDriver, TerminalError};
