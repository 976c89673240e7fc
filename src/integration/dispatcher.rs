//! Routes decoded OSC messages to the per-profile session trackers.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::error::MessageError;
use crate::protocol::{OscArg, OscMessage};
use crate::tracker::{
    Blob, Cursor, FrameEvent, SessionTracker, Token, TrackedEntity, TrackerConfig,
};

/// The 2D TUIO profiles this crate tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    Cursor2D,
    Object2D,
    Blob2D,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Cursor2D, Profile::Object2D, Profile::Blob2D];

    pub fn address(self) -> &'static str {
        match self {
            Profile::Cursor2D => "/tuio/2Dcur",
            Profile::Object2D => "/tuio/2Dobj",
            Profile::Blob2D => "/tuio/2Dblb",
        }
    }

    pub fn from_address(address: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.address() == address)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.address())
    }
}

/// Message type carried in the first argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Source,
    Alive,
    Set,
    Fseq,
}

impl Command {
    pub fn parse(arg: &OscArg) -> Result<Self, MessageError> {
        let Some(bytes) = arg.as_bytes() else {
            return Err(MessageError::ArgumentType {
                command: "message",
                position: 0,
                expected: "string",
                got: arg.type_name(),
            });
        };
        match bytes {
            b"source" => Ok(Command::Source),
            b"alive" => Ok(Command::Alive),
            b"set" => Ok(Command::Set),
            b"fseq" => Ok(Command::Fseq),
            other => Err(MessageError::UnknownCommand(
                String::from_utf8_lossy(other).into_owned(),
            )),
        }
    }
}

/// A completed frame for one profile.
#[derive(Debug, Clone, PartialEq)]
pub enum TuioEvent {
    Cursor(FrameEvent<Cursor>),
    Token(FrameEvent<Token>),
    Blob(FrameEvent<Blob>),
}

impl TuioEvent {
    pub fn profile(&self) -> Profile {
        match self {
            TuioEvent::Cursor(_) => Profile::Cursor2D,
            TuioEvent::Token(_) => Profile::Object2D,
            TuioEvent::Blob(_) => Profile::Blob2D,
        }
    }

    pub fn frame_seq(&self) -> Option<i32> {
        match self {
            TuioEvent::Cursor(e) => e.frame_seq,
            TuioEvent::Token(e) => e.frame_seq,
            TuioEvent::Blob(e) => e.frame_seq,
        }
    }

    pub fn active_len(&self) -> usize {
        match self {
            TuioEvent::Cursor(e) => e.active.len(),
            TuioEvent::Token(e) => e.active.len(),
            TuioEvent::Blob(e) => e.active.len(),
        }
    }

    pub fn dead_len(&self) -> usize {
        match self {
            TuioEvent::Cursor(e) => e.dead.len(),
            TuioEvent::Token(e) => e.dead.len(),
            TuioEvent::Blob(e) => e.dead.len(),
        }
    }
}

/// Running counters, mostly for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Messages seen, valid or not.
    pub messages: u64,
    /// Frame events emitted.
    pub frames: u64,
    /// Messages skipped because they could not be applied.
    pub warnings: u64,
}

/// Owns one tracker per profile and feeds them decoded messages.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    cursors: SessionTracker<Cursor>,
    tokens: SessionTracker<Token>,
    blobs: SessionTracker<Blob>,
    stats: DispatchStats,
}

impl Dispatcher {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            cursors: SessionTracker::new(config.clone()),
            tokens: SessionTracker::new(config.clone()),
            blobs: SessionTracker::new(config),
            stats: DispatchStats::default(),
        }
    }

    pub fn cursors(&self) -> &SessionTracker<Cursor> {
        &self.cursors
    }

    pub fn tokens(&self) -> &SessionTracker<Token> {
        &self.tokens
    }

    pub fn blobs(&self) -> &SessionTracker<Blob> {
        &self.blobs
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Apply one message. Errors are logged and counted, never propagated.
    pub fn dispatch(&mut self, message: &OscMessage) -> Option<TuioEvent> {
        self.stats.messages += 1;
        match self.try_dispatch(message) {
            Ok(Some(event)) => {
                self.stats.frames += 1;
                debug!(
                    profile = %event.profile(),
                    frame = ?event.frame_seq(),
                    active = event.active_len(),
                    dead = event.dead_len(),
                    "frame"
                );
                Some(event)
            }
            Ok(None) => None,
            Err(e) => {
                self.stats.warnings += 1;
                warn!(address = %message.address, error = %e, "ignoring TUIO message");
                None
            }
        }
    }

    /// Apply a batch in order. A bad message only skips itself.
    pub fn dispatch_all<'a, I>(&mut self, messages: I) -> Vec<TuioEvent>
    where
        I: IntoIterator<Item = &'a OscMessage>,
    {
        messages
            .into_iter()
            .filter_map(|m| self.dispatch(m))
            .collect()
    }

    /// Apply one message, reporting why it was rejected.
    pub fn try_dispatch(&mut self, message: &OscMessage) -> Result<Option<TuioEvent>, MessageError> {
        trace!(address = %message.address, args = ?message.args, "message");

        let profile = Profile::from_address(&message.address)
            .ok_or_else(|| MessageError::UnknownAddress(message.address.clone()))?;
        let first = message.args.first().ok_or_else(|| MessageError::Empty {
            address: message.address.clone(),
        })?;
        let command = Command::parse(first)?;
        let args = &message.args;

        Ok(match profile {
            Profile::Cursor2D => apply(&mut self.cursors, command, args)?.map(TuioEvent::Cursor),
            Profile::Object2D => apply(&mut self.tokens, command, args)?.map(TuioEvent::Token),
            Profile::Blob2D => apply(&mut self.blobs, command, args)?.map(TuioEvent::Blob),
        })
    }
}

fn apply<E: TrackedEntity>(
    tracker: &mut SessionTracker<E>,
    command: Command,
    args: &[OscArg],
) -> Result<Option<FrameEvent<E>>, MessageError> {
    match command {
        Command::Source => tracker.handle_source(args).map(|()| None),
        Command::Alive => tracker.handle_alive(args),
        Command::Set => tracker.handle_set(args).map(|()| None),
        Command::Fseq => Ok(Some(tracker.handle_frame(args))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::MessageBuilder;

    #[test]
    fn test_profile_addresses() {
        for profile in Profile::ALL {
            assert_eq!(Profile::from_address(profile.address()), Some(profile));
        }
        assert_eq!(Profile::from_address("/tuio/3Dcur"), None);
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse(&OscArg::from("alive")), Ok(Command::Alive));
        assert_eq!(
            Command::parse(&OscArg::Blob(b"fseq".to_vec())),
            Ok(Command::Fseq)
        );
        assert_eq!(
            Command::parse(&OscArg::from("bogus")),
            Err(MessageError::UnknownCommand("bogus".into()))
        );
        assert!(Command::parse(&OscArg::Int(1)).is_err());
    }

    #[test]
    fn test_bad_messages_do_not_stop_batch() {
        let mut dispatcher = Dispatcher::default();
        let batch = vec![
            MessageBuilder::new("/tuio/unknown").string("alive").build(),
            MessageBuilder::new(Profile::Cursor2D.address()).build(),
            MessageBuilder::new(Profile::Cursor2D.address()).string("nope").build(),
            MessageBuilder::alive(Profile::Cursor2D, &[7]),
            MessageBuilder::fseq(Profile::Cursor2D, 10),
        ];

        let events = dispatcher.dispatch_all(&batch);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].frame_seq(), Some(10));
        assert_eq!(events[0].active_len(), 1);

        let stats = dispatcher.stats();
        assert_eq!(stats.messages, 5);
        assert_eq!(stats.warnings, 3);
        assert_eq!(stats.frames, 1);
    }

    #[test]
    fn test_profiles_are_independent() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.dispatch(&MessageBuilder::alive(Profile::Cursor2D, &[1]));
        dispatcher.dispatch(&MessageBuilder::alive(Profile::Object2D, &[1, 2]));

        assert_eq!(dispatcher.cursors().len(), 1);
        assert_eq!(dispatcher.tokens().len(), 2);
        assert!(dispatcher.blobs().is_empty());

        let event = dispatcher
            .dispatch(&MessageBuilder::fseq(Profile::Object2D, 3))
            .unwrap();
        assert_eq!(event.profile(), Profile::Object2D);
    }
}
