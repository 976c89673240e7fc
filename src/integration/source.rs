//! Trait for datagram transports feeding the tracker.

use std::io;
use std::net::UdpSocket;

/// Anything that hands out whole datagrams, one per call.
///
/// Implement this to feed the pipeline from something other than a UDP
/// socket, e.g. a capture file replay.
///
/// # Example
///
/// ```
/// use std::collections::VecDeque;
/// use std::io;
/// use tuio_tracker::DatagramSource;
///
/// struct Replay(VecDeque<Vec<u8>>);
///
/// impl DatagramSource for Replay {
///     fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
///         let datagram = self
///             .0
///             .pop_front()
///             .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))?;
///         let n = datagram.len().min(buf.len());
///         buf[..n].copy_from_slice(&datagram[..n]);
///         Ok(n)
///     }
/// }
/// ```
pub trait DatagramSource {
    /// Block until one datagram arrives and copy it into `buf`.
    ///
    /// Returns the number of bytes written; datagrams longer than `buf` are
    /// truncated.
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl DatagramSource for UdpSocket {
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        UdpSocket::recv(self, buf)
    }
}
