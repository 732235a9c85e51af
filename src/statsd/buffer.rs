use std::io::Write;

use tracing::warn;

use crate::{MetricResult, MetricsError};

/// Packet size used when none (or zero) is configured.
///
/// See <https://github.com/statsd/statsd/blob/master/docs/metric_types.md#multi-metric-packets>.
pub const DEFAULT_PACKET_SIZE: usize = 512;

/// What to do when the flush forced by an overflowing append fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Log the error, discard the pending packet and keep buffering.
    #[default]
    Swallow,
    /// Return the error from the append; nothing is discarded or buffered.
    Propagate,
}

/// Accumulates newline-joined lines into packets of at most `capacity` bytes.
///
/// A packet is written to the sink with a single `write_all` followed by a
/// `flush` of the sink, so datagram sinks emit exactly one datagram per packet.
pub struct PacketBuffer<W> {
    sink: Option<W>,
    buf: Vec<u8>,
    capacity: usize,
    policy: OverflowPolicy,
}

impl<W> std::fmt::Debug for PacketBuffer<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PacketBuffer")
            .field("buffered", &self.buf.len())
            .field("capacity", &self.capacity)
            .field("policy", &self.policy)
            .field("closed", &self.sink.is_none())
            .finish()
    }
}

impl<W: Write> PacketBuffer<W> {
    /// Creates a buffer in front of `sink`. A `capacity` of zero selects
    /// [`DEFAULT_PACKET_SIZE`].
    pub fn new(sink: W, capacity: usize, policy: OverflowPolicy) -> Self {
        let capacity = if capacity == 0 {
            DEFAULT_PACKET_SIZE
        } else {
            capacity
        };
        Self {
            sink: Some(sink),
            buf: Vec::with_capacity(capacity),
            capacity,
            policy,
        }
    }

    /// Maximum packet size in bytes.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes waiting for the next flush.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Bytes that still fit before a flush is forced.
    pub fn available(&self) -> usize {
        self.capacity - self.buf.len()
    }

    /// Whether [`close`](Self::close) has released the sink.
    pub const fn is_closed(&self) -> bool {
        self.sink.is_none()
    }

    /// The sink, unless the buffer was closed.
    pub const fn get_ref(&self) -> Option<&W> {
        self.sink.as_ref()
    }

    /// Appends one line, flushing the pending packet first if the line and its
    /// separator do not fit.
    ///
    /// A line larger than the whole capacity is written straight to the sink as
    /// a packet of its own.
    ///
    /// # Errors
    /// Returns [`MetricsError::Closed`] after close, the forced flush error under
    /// [`OverflowPolicy::Propagate`], or the sink error of an oversize write.
    pub fn append(&mut self, line: &[u8]) -> MetricResult<()> {
        if self.sink.is_none() {
            return Err(MetricsError::Closed);
        }

        let separator = usize::from(!self.buf.is_empty());
        if self.available() < line.len() + separator {
            if let Err(err) = self.flush() {
                match self.policy {
                    OverflowPolicy::Propagate => return Err(err),
                    OverflowPolicy::Swallow => {
                        warn!(
                            "Dropping {} buffered bytes after flush error: {err}",
                            self.buf.len()
                        );
                        self.buf.clear();
                    }
                }
            }
        }

        if line.len() > self.capacity {
            let sink = self.sink.as_mut().ok_or(MetricsError::Closed)?;
            write_packet(sink, line)?;
            return Ok(());
        }

        if !self.buf.is_empty() {
            self.buf.push(b'\n');
        }
        self.buf.extend_from_slice(line);
        Ok(())
    }

    /// Writes the pending packet to the sink and returns its size.
    ///
    /// # Errors
    /// Returns the sink error unmodified; the pending bytes are kept so a later
    /// flush can retry them.
    pub fn flush(&mut self) -> MetricResult<usize> {
        let sink = self.sink.as_mut().ok_or(MetricsError::Closed)?;
        if self.buf.is_empty() {
            return Ok(0);
        }
        write_packet(sink, &self.buf)?;
        // only clear when no error occurs
        let written = self.buf.len();
        self.buf.clear();
        Ok(written)
    }

    /// Flushes, then releases the sink and hands it back.
    ///
    /// # Errors
    /// Returns the flush error, in which case the buffer stays open.
    pub fn close(&mut self) -> MetricResult<W> {
        self.flush()?;
        let sink = self.sink.take().ok_or(MetricsError::Closed)?;
        self.buf = Vec::new();
        Ok(sink)
    }
}

fn write_packet<W: Write>(sink: &mut W, packet: &[u8]) -> MetricResult<()> {
    sink.write_all(packet)?;
    sink.flush()?;
    Ok(())
}
