//! Frame-synchronized tracking of TUIO 1.1 cursors, tokens and blobs.
//!
//! A TUIO sender describes each profile (`/tuio/2Dcur`, `/tuio/2Dobj`,
//! `/tuio/2Dblb`) with three messages per frame: `alive` lists the sessions
//! present right now, any number of `set` messages update them, and `fseq`
//! closes the frame. `SessionTracker` turns that stream into one
//! `FrameEvent` per frame carrying the active table and the sessions that
//! disappeared.
//!
//! # Example
//!
//! ```
//! use tuio_tracker::{Dispatcher, MessageBuilder, MotionState, Profile, TrackedEntity, TuioEvent};
//!
//! let mut dispatcher = Dispatcher::default();
//! dispatcher.dispatch(&MessageBuilder::alive(Profile::Cursor2D, &[1]));
//! dispatcher.dispatch(&MessageBuilder::cursor_set(1, 0.5, 0.5, 0.0, 0.0, 0.0));
//!
//! match dispatcher.dispatch(&MessageBuilder::fseq(Profile::Cursor2D, 1)) {
//!     Some(TuioEvent::Cursor(frame)) => {
//!         assert_eq!(frame.active[&1].state(), MotionState::Pressed);
//!         assert!(frame.dead.is_empty());
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

pub mod config;
pub mod error;
pub mod integration;
pub mod protocol;
pub mod tracker;

pub use config::{ListenerConfig, TuioConfig, load_config};
pub use error::{DecodeError, MessageError};
pub use integration::{
    DatagramSource, DispatchStats, Dispatcher, MessageBuilder, Profile, TrackerPipeline, TuioEvent,
};
pub use tracker::{
    Blob, Cursor, FrameEvent, FrameTrigger, MotionState, SessionId, SessionTracker, Token,
    TrackedEntity, TrackerConfig,
};
