//! Basic usage of every metric type over UDP.
//!
//! Run with: `cargo run --example basic`

use rylv_statsd::{annotate, dial_size};
use std::time::Duration;

fn main() -> rylv_statsd::MetricResult<()> {
    let mut client = dial_size("127.0.0.1:8125", 1432)?;
    client.set_prefix("myapp.");

    // Counters
    client.incr("request.count")?;
    client.incr_by("bytes.sent", 1024)?;
    client.decr("queue.depth")?;
    // Sent roughly one time in ten, tagged with |@0.1
    client.increment("cache.hit", 1, 0.1)?;

    // Timings
    client.timing("db.query", 12, 1.0)?;
    client.duration("request.latency", Duration::from_millis(42), 1.0)?;
    client.time("work", 1.0, || std::thread::sleep(Duration::from_millis(5)))?;

    // Gauges, absolute and relative
    client.gauge("connections.active", 100, 1.0)?;
    client.increment_gauge_by("connections.active", 5)?;
    client.decrement_gauge_by("connections.active", 2)?;

    // Sets and annotations
    client.unique("users.seen", 4242, 1.0)?;
    annotate!(client, "deploy", "version {} rolled out", 7)?;

    // Close flushes pending lines before releasing the socket
    client.close()?;

    println!("All metric types recorded and flushed.");
    Ok(())
}
