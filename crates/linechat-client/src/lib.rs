//! Connection session for linechat
//!
//! Owns the byte stream to the server and the two background tasks that run
//! beside the foreground event loop:
//!
//! - heartbeat: periodically sends `PING -1` and extends the stream deadlines
//! - receive: reads the stream and emits one [`Inbound`] per server line
//!
//! Writes from the foreground task and the heartbeat are serialized through
//! a shared [`CommandSink`]. All tasks observe a single
//! [`tokio_util::sync::CancellationToken`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod profile;
mod session;

pub use error::SessionError;
pub use profile::UserProfile;
pub use session::{CommandSink, ConnectionSession, Deadlines, Inbound, SessionConfig};
pub use tokio_util::sync::CancellationToken;
