use std::borrow::Cow;

pub mod buffer;
pub mod client;
pub mod format;
pub mod macros;
#[cfg(feature = "udp")]
pub mod net;
pub mod observer;
pub mod sampler;

/// The wire type of a metric line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// `|c`
    Counter,
    /// `|ms`, also used for durations and histograms.
    Timing,
    /// `|g`, replaces the gauge value.
    Gauge,
    /// `+value|g`, raises the gauge value.
    GaugeIncrement,
    /// `-value|g`, lowers the gauge value.
    GaugeDecrement,
    /// `|s`, counts unique occurrences.
    Set,
    /// `|a`, free-form text value.
    Annotation,
}

impl MetricKind {
    /// Type tag written after the `|` separator.
    #[must_use]
    pub const fn type_tag(self) -> &'static str {
        match self {
            Self::Counter => "c",
            Self::Timing => "ms",
            Self::Gauge | Self::GaugeIncrement | Self::GaugeDecrement => "g",
            Self::Set => "s",
            Self::Annotation => "a",
        }
    }

    /// Sign written in front of the value for relative gauges.
    #[must_use]
    pub const fn value_sign(self) -> &'static str {
        match self {
            Self::GaugeIncrement => "+",
            Self::GaugeDecrement => "-",
            _ => "",
        }
    }
}

/// The value part of a metric line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricValue<'a> {
    /// A signed integer, e.g. a counter delta.
    Signed(i64),
    /// An unsigned integer, e.g. a gauge adjustment.
    Unsigned(u64),
    /// Pre-rendered text, used by annotations.
    Text(Cow<'a, str>),
}

impl From<i64> for MetricValue<'_> {
    fn from(value: i64) -> Self {
        Self::Signed(value)
    }
}

impl From<u64> for MetricValue<'_> {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl<'a> From<&'a str> for MetricValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl From<String> for MetricValue<'_> {
    fn from(value: String) -> Self {
        Self::Text(Cow::Owned(value))
    }
}

/// A single measurement event, rendered once and never stored.
///
/// Every convenience operation on [`Client`](crate::Client) builds one of these
/// and hands it to [`Client::send`](crate::Client::send).
#[derive(Debug, Clone, PartialEq)]
pub struct Metric<'a> {
    /// Stat (bucket) name, without the client prefix.
    pub stat: &'a str,
    /// Value to report.
    pub value: MetricValue<'a>,
    /// Wire type.
    pub kind: MetricKind,
    /// Sample rate. Values `>= 1` are always sent without a rate suffix.
    pub rate: f64,
}

impl<'a> Metric<'a> {
    /// Creates a metric sent at full rate.
    pub fn new(stat: &'a str, value: impl Into<MetricValue<'a>>, kind: MetricKind) -> Self {
        Self {
            stat,
            value: value.into(),
            kind,
            rate: 1.0,
        }
    }

    /// Counter adjusted by `count`.
    #[must_use]
    pub fn counter(stat: &'a str, count: i64) -> Self {
        Self::new(stat, count, MetricKind::Counter)
    }

    /// Timing in milliseconds.
    #[must_use]
    pub fn timing(stat: &'a str, millis: i64) -> Self {
        Self::new(stat, millis, MetricKind::Timing)
    }

    /// Absolute gauge value.
    #[must_use]
    pub fn gauge(stat: &'a str, value: i64) -> Self {
        Self::new(stat, value, MetricKind::Gauge)
    }

    /// Unique occurrence of `value`.
    #[must_use]
    pub fn set(stat: &'a str, value: i64) -> Self {
        Self::new(stat, value, MetricKind::Set)
    }

    /// Annotation carrying free-form text.
    pub fn annotation(stat: &'a str, text: impl Into<Cow<'a, str>>) -> Self {
        Self::new(stat, MetricValue::Text(text.into()), MetricKind::Annotation)
    }

    /// Sets the sample rate.
    #[must_use]
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }
}
