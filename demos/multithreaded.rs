//! Sharing a Client across multiple threads using Arc.
//!
//! Run with: `cargo run --example multithreaded`

use rylv_statsd::dial;
use std::sync::Arc;

fn main() -> rylv_statsd::MetricResult<()> {
    let client = Arc::new(dial("127.0.0.1:8125")?);

    let mut handles = Vec::new();

    // Spawn worker threads that record metrics concurrently
    for thread_id in 0..4 {
        let client = client.clone();
        let handle = std::thread::spawn(move || {
            let stat = format!("worker.{thread_id}.tasks");
            for i in 0..100 {
                if let Err(err) = client.incr(&stat) {
                    eprintln!("send failed: {err}");
                }
                let _ = client.timing("task.duration", i * 10, 0.5);
            }
        });
        handles.push(handle);
    }

    // Wait for all threads to finish
    for handle in handles {
        if handle.join().is_err() {
            eprintln!("worker panicked");
        }
    }

    // close() only needs a shared reference, the Arc can stay alive
    client.close()?;

    println!("All threads finished. Metrics flushed.");
    Ok(())
}
