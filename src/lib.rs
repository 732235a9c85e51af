//! # rylv-statsd
//!
//! A buffered, sampling-aware statsd client for Rust.
//!
//! ## Features
//!
//! - **Packet Batching**: Lines are newline-joined into packets bounded by a maximum size
//! - **Sampling**: Per-call sample rates with `|@rate` annotation for the collector
//! - **Thread Safe**: A single `Client` can be shared across threads via `Arc<Client<_>>`
//! - **Metric Types**: Counters, Timings, Gauges (absolute and delta), Sets and Annotations
//! - **Any Sink**: UDP out of the box (`udp` feature), or any `std::io::Write`
//!
//! ## Quick Start
//!
//! ```no_run
//! use rylv_statsd::{annotate, dial};
//! use std::time::Duration;
//!
//! let mut client = dial("127.0.0.1:8125")?;
//! client.set_prefix("myapp.");
//!
//! client.incr("request.count")?;
//! client.increment("cache.hit", 1, 0.1)?;
//! client.gauge("connections.active", 100, 1.0)?;
//! client.duration("request.latency", Duration::from_millis(42), 1.0)?;
//! annotate!(client, "deploy", "version {}", 7)?;
//!
//! // Buffered lines are only sent on flush, overflow or close
//! client.close()?;
//! # Ok::<(), rylv_statsd::MetricsError>(())
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

// https://github.com/statsd/statsd/blob/master/docs/metric_types.md
mod error;
mod statsd;

pub use error::MetricsError;
pub use statsd::buffer::{OverflowPolicy, PacketBuffer, DEFAULT_PACKET_SIZE};
pub use statsd::client::{Client, ClientOptions};
pub use statsd::format::{duration_millis, format_line};
#[cfg(feature = "udp")]
pub use statsd::net::{dial, dial_size, dial_timeout, UdpSink};
pub use statsd::observer::{NoopObserver, SendObserver, TracingObserver};
pub use statsd::sampler::{FixedSource, RandomSource, SampleDecision, Sampler, ThreadRngSource};
pub use statsd::{Metric, MetricKind, MetricValue};

/// Result type for metric operations.
///
/// Wraps errors that can occur during metric formatting and transmission.
pub type MetricResult<T> = Result<T, MetricsError>;
