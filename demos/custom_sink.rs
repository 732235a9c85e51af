//! Using a custom sink to capture packets instead of sending them via UDP.
//!
//! Run with: `cargo run --example custom_sink`

use rylv_statsd::{Client, ClientOptions, TracingObserver};
use std::io;
use std::sync::{Arc, Mutex};

/// A custom sink that stores packets in a shared Vec.
struct InMemorySink {
    packets: Arc<Mutex<Vec<String>>>,
    current: Vec<u8>,
}

impl io::Write for InMemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.current.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let packet = String::from_utf8_lossy(&self.current).into_owned();
        self.current.clear();
        self.packets.lock().unwrap().push(packet);
        Ok(())
    }
}

fn main() -> rylv_statsd::MetricResult<()> {
    let packets = Arc::new(Mutex::new(Vec::new()));
    let sink = InMemorySink {
        packets: packets.clone(),
        current: Vec::new(),
    };

    let options = ClientOptions {
        max_packet_size: 64,
        stats_prefix: "app.".to_string(),
        ..ClientOptions::default()
    };
    // Every line is also logged at debug level under the `statsd` target
    let client = Client::with_options(sink, options).with_observer(TracingObserver);

    for i in 0..10 {
        client.incr("request.count")?;
        client.gauge("connections", i, 1.0)?;
    }

    // Close triggers a final flush
    client.close()?;

    // Inspect captured packets
    let captured = packets.lock().unwrap();
    println!("Captured {} packets:", captured.len());
    for packet in captured.iter() {
        println!("  {packet:?}");
    }
    Ok(())
}
