use std::fmt::Display;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::warn;

use super::buffer::{OverflowPolicy, PacketBuffer, DEFAULT_PACKET_SIZE};
use super::format::{duration_millis, format_line};
use super::observer::{NoopObserver, SendObserver};
use super::sampler::{SampleDecision, Sampler};
use super::{Metric, MetricKind};
use crate::{MetricResult, MetricsError};

/// Configuration options for a [`Client`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Maximum size of a single packet in bytes. Zero selects [`DEFAULT_PACKET_SIZE`].
    pub max_packet_size: usize,
    /// Prefix prepended verbatim to all stat names. Include a trailing dot if desired (e.g., `"myapp."` results in `"myapp.metric"`).
    pub stats_prefix: String,
    /// Behavior when the flush forced by a full buffer fails.
    pub overflow_policy: OverflowPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            max_packet_size: DEFAULT_PACKET_SIZE,
            stats_prefix: String::new(),
            overflow_policy: OverflowPolicy::default(),
        }
    }
}

/// A statsd client buffering lines in front of a byte sink.
///
/// Lines are sent when [`flush`](Self::flush) is called, when the next line
/// would overflow the packet, on [`close`](Self::close) and on drop. There is no
/// background timer.
///
/// This type is `Send + Sync` for `Send` sinks and can be shared across threads
/// via `Arc<Client<_>>`. Every buffer operation, explicit flush and close
/// included, runs under one lock, so lines from concurrent callers never
/// interleave.
///
/// # Example
///
/// ```
/// use rylv_statsd::{Client, ClientOptions};
///
/// let options = ClientOptions {
///     stats_prefix: "app.".to_string(),
///     ..ClientOptions::default()
/// };
/// let client = Client::with_options(Vec::<u8>::new(), options);
///
/// client.incr("hits")?;
/// client.gauge("mem", 42, 1.0)?;
/// client.flush()?;
/// # Ok::<(), rylv_statsd::MetricsError>(())
/// ```
pub struct Client<W: Write> {
    buffer: Mutex<PacketBuffer<W>>,
    closed: AtomicBool,
    prefix: String,
    sampler: Sampler,
    observer: Box<dyn SendObserver>,
}

impl<W: Write> std::fmt::Debug for Client<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("prefix", &self.prefix)
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl<W: Write> Client<W> {
    /// Creates a client over `sink` with default options.
    pub fn new(sink: W) -> Self {
        Self::with_options(sink, ClientOptions::default())
    }

    /// Creates a client over `sink` with packets of at most `size` bytes.
    pub fn with_size(sink: W, size: usize) -> Self {
        Self::with_options(
            sink,
            ClientOptions {
                max_packet_size: size,
                ..ClientOptions::default()
            },
        )
    }

    /// Creates a client over `sink` configured by `options`.
    pub fn with_options(sink: W, options: ClientOptions) -> Self {
        Self {
            buffer: Mutex::new(PacketBuffer::new(
                sink,
                options.max_packet_size,
                options.overflow_policy,
            )),
            closed: AtomicBool::new(false),
            prefix: options.stats_prefix,
            sampler: Sampler::default(),
            observer: Box::new(NoopObserver),
        }
    }

    /// Replaces the sampler, e.g. to make sampling deterministic.
    #[must_use]
    pub fn with_sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Installs an observer that sees every line before it is buffered.
    #[must_use]
    pub fn with_observer<O: SendObserver + 'static>(mut self, observer: O) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Sets the literal prefix of every stat. No delimiter is added, so use
    /// `"foo.bar."` to get `"foo.bar.baz"` from `"baz"`.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    /// The configured stat prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Maximum packet size in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer.lock().capacity()
    }

    /// Whether [`close`](Self::close) succeeded.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Samples, renders and buffers one event.
    ///
    /// An event sampled away returns `Ok(())` without touching the buffer.
    ///
    /// # Errors
    /// Returns [`MetricsError::Closed`] after close, or the sink error of a
    /// flush triggered by this event.
    pub fn send(&self, metric: &Metric<'_>) -> MetricResult<()> {
        if self.is_closed() {
            return Err(MetricsError::Closed);
        }

        let rate = match self.sampler.decide(metric.rate) {
            SampleDecision::Emit(rate) => rate,
            SampleDecision::Drop => return Ok(()),
        };

        let mut line = String::new();
        format_line(&self.prefix, metric, rate, &mut line);
        self.observer.on_send(metric, &line);

        self.buffer.lock().append(line.as_bytes())
    }

    /// Adjusts a counter by `count` at `rate`.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn increment(&self, stat: &str, count: i64, rate: f64) -> MetricResult<()> {
        self.send(&Metric::counter(stat, count).with_rate(rate))
    }

    /// Increments a counter by one.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn incr(&self, stat: &str) -> MetricResult<()> {
        self.increment(stat, 1, 1.0)
    }

    /// Increments a counter by `n`.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn incr_by(&self, stat: &str, n: i64) -> MetricResult<()> {
        self.increment(stat, n, 1.0)
    }

    /// Lowers a counter by `count` at `rate`. Negation wraps, so `i64::MIN`
    /// is sent unchanged.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn decrement(&self, stat: &str, count: i64, rate: f64) -> MetricResult<()> {
        self.increment(stat, count.wrapping_neg(), rate)
    }

    /// Decrements a counter by one.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn decr(&self, stat: &str) -> MetricResult<()> {
        self.increment(stat, -1, 1.0)
    }

    /// Decrements a counter by `n`.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn decr_by(&self, stat: &str, n: i64) -> MetricResult<()> {
        self.increment(stat, n.wrapping_neg(), 1.0)
    }

    /// Records a timing in milliseconds.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn timing(&self, stat: &str, millis: i64, rate: f64) -> MetricResult<()> {
        self.send(&Metric::timing(stat, millis).with_rate(rate))
    }

    /// Alias of [`timing`](Self::timing); collectors disagree on a dedicated
    /// histogram type, so the `ms` type is used.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn histogram(&self, stat: &str, value: i64, rate: f64) -> MetricResult<()> {
        self.timing(stat, value, rate)
    }

    /// Records a duration as a timing.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn duration(&self, stat: &str, duration: Duration, rate: f64) -> MetricResult<()> {
        self.timing(stat, duration_millis(duration), rate)
    }

    /// Records the time elapsed since `start`.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn duration_since(&self, stat: &str, start: Instant) -> MetricResult<()> {
        self.duration(stat, start.elapsed(), 1.0)
    }

    /// Runs `f` and records how long it took.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn time<F: FnOnce()>(&self, stat: &str, rate: f64, f: F) -> MetricResult<()> {
        let start = Instant::now();
        f();
        self.duration(stat, start.elapsed(), rate)
    }

    /// Sets a gauge to `value`.
    ///
    /// A negative `value` renders as `-n|g`, which collectors read as a
    /// relative decrement. Use [`decrement_gauge`](Self::decrement_gauge) for
    /// deltas and set the gauge to zero first if a negative absolute value is
    /// needed.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn gauge(&self, stat: &str, value: i64, rate: f64) -> MetricResult<()> {
        self.send(&Metric::gauge(stat, value).with_rate(rate))
    }

    /// Raises a gauge by `value` at `rate`.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn increment_gauge(&self, stat: &str, value: u64, rate: f64) -> MetricResult<()> {
        self.send(&Metric::new(stat, value, MetricKind::GaugeIncrement).with_rate(rate))
    }

    /// Raises a gauge by `value`.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn increment_gauge_by(&self, stat: &str, value: u64) -> MetricResult<()> {
        self.increment_gauge(stat, value, 1.0)
    }

    /// Lowers a gauge by `value` at `rate`.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn decrement_gauge(&self, stat: &str, value: u64, rate: f64) -> MetricResult<()> {
        self.send(&Metric::new(stat, value, MetricKind::GaugeDecrement).with_rate(rate))
    }

    /// Lowers a gauge by `value`.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn decrement_gauge_by(&self, stat: &str, value: u64) -> MetricResult<()> {
        self.decrement_gauge(stat, value, 1.0)
    }

    /// Records one occurrence of `value` in a set.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn unique(&self, stat: &str, value: i64, rate: f64) -> MetricResult<()> {
        self.send(&Metric::set(stat, value).with_rate(rate))
    }

    /// Sends an annotation. Pass `format_args!(..)` or use the
    /// [`annotate!`](crate::annotate) macro for formatted text.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub fn annotate(&self, name: &str, value: impl Display) -> MetricResult<()> {
        self.send(&Metric::annotation(name, value.to_string()))
    }

    /// Writes buffered lines to the sink as one packet.
    ///
    /// # Errors
    /// Returns the sink error, or [`MetricsError::Closed`] after close.
    pub fn flush(&self) -> MetricResult<usize> {
        self.buffer.lock().flush()
    }

    /// Flushes and releases the sink. Later calls fail with
    /// [`MetricsError::Closed`].
    ///
    /// # Errors
    /// Returns the flush error, in which case the client remains open.
    pub fn close(&self) -> MetricResult<()> {
        let mut buffer = self.buffer.lock();
        let sink = buffer.close()?;
        self.closed.store(true, Ordering::Release);
        drop(sink);
        Ok(())
    }
}

impl<W: Write> Drop for Client<W> {
    fn drop(&mut self) {
        let buffer = self.buffer.get_mut();
        if buffer.is_closed() {
            return;
        }
        if let Err(err) = buffer.flush() {
            warn!("Error flushing metrics on drop: {err}");
        }
    }
}
