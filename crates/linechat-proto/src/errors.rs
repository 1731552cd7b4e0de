//! Decode errors.

use thiserror::Error;

/// Reasons a server line could not be turned into a [`crate::ServerEvent`].
///
/// None of these are fatal. The event loop drops the offending line and the
/// session continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Line was empty or whitespace only.
    #[error("empty line")]
    Empty,

    /// First token is not a known keyword.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A required field was absent.
    #[error("{command}: missing {field}")]
    MissingField {
        /// Keyword of the message being decoded.
        command: &'static str,
        /// Name of the missing field.
        field: &'static str,
    },

    /// A room id field was not a decimal number.
    #[error("{command}: invalid room id {value:?}")]
    InvalidId {
        /// Keyword of the message being decoded.
        command: &'static str,
        /// Offending token.
        value: String,
    },
}

/// A server line grew past the configured limit without a terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("line exceeds {limit} bytes without a terminator")]
pub struct LineTooLong {
    /// Maximum accepted line length in bytes.
    pub limit: usize,
}
