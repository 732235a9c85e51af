/// Macro for sending an annotation whose text is built from a format string.
///
/// Expands to [`Client::annotate`](crate::Client::annotate) with
/// `format_args!`, so the text is only rendered when the event is sent.
///
/// # Examples
///
/// ```
/// use rylv_statsd::{annotate, Client};
///
/// let client = Client::new(Vec::<u8>::new());
///
/// // With arguments
/// annotate!(client, "deploy", "version {} on {}", 42, "web-1")?;
///
/// // Plain text
/// annotate!(client, "restart", "manual")?;
/// # Ok::<(), rylv_statsd::MetricsError>(())
/// ```
#[macro_export]
macro_rules! annotate {
    ($client:expr, $name:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $client.annotate($name, ::std::format_args!($fmt $(, $arg)*))
    };
}
