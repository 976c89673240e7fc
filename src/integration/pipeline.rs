//! TrackerPipeline for combining a datagram transport with the dispatcher.

use std::io;

use tracing::warn;

use crate::integration::{DatagramSource, Dispatcher, TuioEvent};
use crate::protocol;
use crate::tracker::TrackerConfig;

/// Default receive buffer; larger than any sane TUIO bundle.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Bundles a `DatagramSource` with the decoder and a `Dispatcher`.
///
/// Each datagram is decoded and dispatched to completion before the next
/// one is read.
pub struct TrackerPipeline<S: DatagramSource> {
    source: S,
    dispatcher: Dispatcher,
    buf: Vec<u8>,
}

impl<S: DatagramSource> TrackerPipeline<S> {
    /// Create a new pipeline with the given source and tracker config.
    pub fn new(source: S, config: TrackerConfig) -> Self {
        Self::with_buffer_size(source, config, DEFAULT_BUFFER_SIZE)
    }

    /// Create a new pipeline with default tracker configuration.
    pub fn with_default_config(source: S) -> Self {
        Self::new(source, TrackerConfig::default())
    }

    pub fn with_buffer_size(source: S, config: TrackerConfig, buffer_size: usize) -> Self {
        Self {
            source,
            dispatcher: Dispatcher::new(config),
            buf: vec![0; buffer_size.max(16)],
        }
    }

    /// Receive one datagram from the source and process it.
    ///
    /// Only transport errors are returned; undecodable datagrams and bad
    /// messages are logged and yield no events.
    pub fn process_next(&mut self) -> io::Result<Vec<TuioEvent>> {
        let n = self.source.recv(&mut self.buf)?;
        let Self { dispatcher, buf, .. } = self;
        Ok(process(dispatcher, &buf[..n]))
    }

    /// Decode and dispatch one datagram that was received elsewhere.
    pub fn process_datagram(&mut self, datagram: &[u8]) -> Vec<TuioEvent> {
        process(&mut self.dispatcher, datagram)
    }

    /// Get a reference to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the underlying dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Get a mutable reference to the underlying dispatcher.
    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }
}

fn process(dispatcher: &mut Dispatcher, datagram: &[u8]) -> Vec<TuioEvent> {
    match protocol::decode(datagram) {
        Ok(packet) => dispatcher.dispatch_all(&packet.into_messages()),
        Err(e) => {
            warn!(len = datagram.len(), error = %e, "dropping undecodable datagram");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use crate::integration::{MessageBuilder, Profile};
    use crate::protocol::{OscPacket, encode};

    struct Replay(VecDeque<Vec<u8>>);

    impl DatagramSource for Replay {
        fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let datagram = self
                .0
                .pop_front()
                .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))?;
            buf[..datagram.len()].copy_from_slice(&datagram);
            Ok(datagram.len())
        }
    }

    fn frame(ids: &[i32], seq: i32) -> Vec<u8> {
        encode(&OscPacket::Bundle {
            timetag: 1,
            content: vec![
                OscPacket::Message(MessageBuilder::source(Profile::Cursor2D, "test@localhost")),
                OscPacket::Message(MessageBuilder::alive(Profile::Cursor2D, ids)),
                OscPacket::Message(MessageBuilder::fseq(Profile::Cursor2D, seq)),
            ],
        })
    }

    #[test]
    fn test_pipeline_process_next() {
        let source = Replay(VecDeque::from(vec![frame(&[1, 2], 1), frame(&[2], 2)]));
        let mut pipeline = TrackerPipeline::with_default_config(source);

        let first = pipeline.process_next().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].active_len(), 2);

        let second = pipeline.process_next().unwrap();
        assert_eq!(second[0].frame_seq(), Some(2));
        assert_eq!(second[0].dead_len(), 1);

        assert!(pipeline.process_next().is_err());
    }

    #[test]
    fn test_undecodable_datagram_is_skipped() {
        let mut pipeline = TrackerPipeline::with_default_config(Replay(VecDeque::new()));
        pipeline.process_datagram(&frame(&[5], 1));

        assert!(pipeline.process_datagram(b"\xff\xfe garbage").is_empty());
        assert_eq!(pipeline.dispatcher().cursors().len(), 1);
        assert_eq!(pipeline.dispatcher().stats().messages, 3);
    }
}
