//! OSC transport encoding for TUIO messages.
//!
//! TUIO 1.1 travels as OSC 1.0 messages, usually grouped into one bundle per
//! frame. This module turns datagrams into `OscMessage`s (and back, for
//! senders and tests); the trackers only ever look at the decoded shape.

mod decoder;
mod encoder;
mod message;

pub use decoder::decode;
pub use encoder::{encode, encode_message};
pub use message::{OscArg, OscMessage, OscPacket};
