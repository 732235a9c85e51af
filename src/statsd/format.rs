use std::time::Duration;

use super::{Metric, MetricValue};

/// Converts a duration to whole milliseconds.
///
/// The duration is taken as fractional seconds first and then scaled, so
/// sub-second parts are never lost to an integer unit conversion.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn duration_millis(duration: Duration) -> i64 {
    (duration.as_secs_f64() * 1000.0) as i64
}

/// Length in bytes of the line [`format_line`] would produce.
#[must_use]
pub fn line_len(prefix: &str, metric: &Metric<'_>, rate: Option<f64>) -> usize {
    // prefix stat ':' sign value '|' type ['|@' rate]
    let mut len = prefix.len() + metric.stat.len() + metric.kind.value_sign().len() + 2;
    len += match &metric.value {
        MetricValue::Signed(v) => itoa::Buffer::new().format(*v).len(),
        MetricValue::Unsigned(v) => itoa::Buffer::new().format(*v).len(),
        MetricValue::Text(s) => s.len(),
    };
    len += metric.kind.type_tag().len();
    if let Some(rate) = rate {
        len += 2 + ryu::Buffer::new().format(rate).len();
    }
    len
}

/// Renders `metric` as a single wire line appended to `out`.
///
/// Format: `<prefix><stat>:<value>|<type>[|@<rate>]`, no trailing newline.
/// `rate` is `Some` only when the event survived sampling below full rate.
pub fn format_line(prefix: &str, metric: &Metric<'_>, rate: Option<f64>, out: &mut String) {
    out.reserve(line_len(prefix, metric, rate));

    out.push_str(prefix);
    out.push_str(metric.stat);
    out.push(':');
    out.push_str(metric.kind.value_sign());
    match &metric.value {
        MetricValue::Signed(v) => out.push_str(itoa::Buffer::new().format(*v)),
        MetricValue::Unsigned(v) => out.push_str(itoa::Buffer::new().format(*v)),
        MetricValue::Text(s) => out.push_str(s),
    }
    out.push('|');
    out.push_str(metric.kind.type_tag());
    if let Some(rate) = rate {
        out.push_str("|@");
        out.push_str(ryu::Buffer::new().format(rate));
    }
}
