//! Integration module for connecting a datagram transport with the trackers.
//!
//! This module routes decoded messages to the per-profile trackers and
//! provides a pipeline that drives them from any `DatagramSource`.

mod builder;
mod dispatcher;
mod pipeline;
mod source;

pub use builder::MessageBuilder;
pub use dispatcher::{Command, DispatchStats, Dispatcher, Profile, TuioEvent};
pub use pipeline::{DEFAULT_BUFFER_SIZE, TrackerPipeline};
pub use source::DatagramSource;
