use super::Metric;

/// Sees every line right before it is buffered.
///
/// Diagnostic only: observers cannot alter or veto a send.
pub trait SendObserver: Send + Sync {
    /// Called with the event and its rendered line (prefix and rate included).
    fn on_send(&self, metric: &Metric<'_>, line: &str);
}

/// Ignores everything. Used when no observer is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SendObserver for NoopObserver {
    #[inline]
    fn on_send(&self, _metric: &Metric<'_>, _line: &str) {}
}

/// Logs every line at debug level under the `statsd` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SendObserver for TracingObserver {
    fn on_send(&self, metric: &Metric<'_>, line: &str) {
        tracing::debug!(target: "statsd", stat = metric.stat, rate = metric.rate, "{line}");
    }
}
