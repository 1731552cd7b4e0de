//! Session errors.

use std::io;

use thiserror::Error;

/// Errors surfaced by [`crate::ConnectionSession`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// Writing to the stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The write deadline passed before the command was flushed.
    #[error("write deadline expired")]
    WriteDeadline,

    /// The receive task was already started for this session.
    #[error("receive already started for this session")]
    AlreadyReceiving,
}
