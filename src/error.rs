//! Error types for OSC decoding and TUIO message handling.

use thiserror::Error;

use crate::tracker::SessionId;

/// Errors raised while decoding an OSC datagram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Not enough bytes left to read the next field.
    #[error("Insufficient data at offset {offset}: need {needed} bytes, got {got}")]
    InsufficientData {
        offset: usize,
        needed: usize,
        got: usize,
    },

    /// An OSC string was not NUL terminated inside the buffer.
    #[error("Unterminated string at offset {offset}")]
    UnterminatedString { offset: usize },

    /// An OSC string was not valid UTF-8.
    #[error("Invalid UTF-8 string at offset {offset}")]
    InvalidString { offset: usize },

    /// Address pattern did not start with `/`.
    #[error("Invalid address pattern: {0:?}")]
    InvalidAddress(String),

    /// Type tag string did not start with `,`.
    #[error("Missing type tag string at offset {offset}")]
    MissingTypeTags { offset: usize },

    /// Argument type this decoder does not understand.
    #[error("Unsupported type tag {tag:?} at offset {offset}")]
    UnsupportedTypeTag { tag: char, offset: usize },

    /// A bundle element or blob declared a size that cannot be valid.
    #[error("Invalid element size {size} at offset {offset}")]
    InvalidSize { size: i32, offset: usize },

    /// Bundles nested deeper than the decoder accepts.
    #[error("Bundle nesting exceeds {max} levels")]
    NestingTooDeep { max: usize },

    /// Bytes left over after a complete message.
    #[error("{0} trailing bytes after message")]
    TrailingBytes(usize),
}

/// Recoverable errors raised while applying a decoded TUIO message.
///
/// None of these are fatal: the dispatcher logs them and moves on to the
/// next message in the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Message carried no arguments, so there is no command to route on.
    #[error("message on {address} has no arguments")]
    Empty { address: String },

    /// Address pattern is not one of the supported 2D profiles.
    #[error("unknown address pattern {0}")]
    UnknownAddress(String),

    /// First argument is not a command this profile understands.
    #[error("unknown message type {0:?}")]
    UnknownCommand(String),

    /// Wrong number of arguments for the command.
    #[error("malformed {command} message: expected {expected} arguments, got {got}")]
    ArgumentCount {
        command: &'static str,
        expected: &'static str,
        got: usize,
    },

    /// Argument at `position` has the wrong type.
    #[error("malformed {command} message: argument {position} should be {expected}, got {got}")]
    ArgumentType {
        command: &'static str,
        position: usize,
        expected: &'static str,
        got: &'static str,
    },

    /// Float argument at `position` is NaN or infinite.
    #[error("malformed {command} message: argument {position} is not finite")]
    NonFinite {
        command: &'static str,
        position: usize,
    },

    /// `set` targets a session that is not currently alive.
    #[error("set for unknown session {0}")]
    UnknownSession(SessionId),
}
