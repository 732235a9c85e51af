use rylv_statsd::{dial_size, MetricResult};
use std::sync::Arc;
use std::time::Instant;

const SERVER_ADDRESS: &str = "127.0.0.1:9090";
const PACKET_SIZE: usize = 1400;

fn main() -> MetricResult<()> {
    let addr = std::env::var("STATSD_ADDR").unwrap_or_else(|_| SERVER_ADDRESS.to_string());
    let threads: usize = std::env::var("STATSD_THREADS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(4);

    let mut client = dial_size(addr.as_str(), PACKET_SIZE)?;
    client.set_prefix("load.");
    let client = Arc::new(client);

    let n = 1024;
    let stats: Arc<Vec<String>> = Arc::new(
        (0..n)
            .map(|i| format!("some.long.metric.by.some.criteria{i}"))
            .collect(),
    );

    let instant = Instant::now();
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let client = Arc::clone(&client);
            let stats = Arc::clone(&stats);
            std::thread::spawn(move || {
                for i in 0..1_000_000 {
                    let stat = &stats[i % n];
                    let _ = client.increment(stat, 1, 0.5);
                    let _ = client.timing(stat, 1, 1.0);
                }
            })
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }
    client.close()?;

    println!("elapsed: {:?}ms", instant.elapsed().as_millis());
    Ok(())
}
