use crate::RecordingSink;
use rylv_statsd::Client;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

#[test]
fn test_parallel_incr_single_packet() {
    let sink = RecordingSink::default();
    let client = Arc::new(Client::with_size(sink.clone(), 8192));
    let num_threads = 32;

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let client = Arc::clone(&client);
            thread::spawn(move || {
                client.incr(&format!("thread.{thread_id}")).unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    client.flush().unwrap();
    let packets = sink.packets();
    assert_eq!(packets.len(), 1);

    let lines: Vec<&str> = packets[0].split('\n').collect();
    assert_eq!(lines.len(), num_threads);
    let unique: HashSet<&str> = lines.iter().copied().collect();
    for thread_id in 0..num_threads {
        let expected = format!("thread.{thread_id}:1|c");
        assert!(unique.contains(expected.as_str()), "missing {expected}");
    }
}

#[test]
fn test_parallel_mixed_metrics_with_overflow() {
    let sink = RecordingSink::default();
    let client = Arc::new(Client::with_size(sink.clone(), 256));
    let num_threads = 8;
    let iterations_per_thread = 2_000;

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let client = Arc::clone(&client);
            thread::spawn(move || {
                let stat = format!("parallel.{thread_id}");
                for i in 0..iterations_per_thread {
                    match i % 4 {
                        0 => client.incr(&stat).unwrap(),
                        1 => client.gauge(&stat, i, 1.0).unwrap(),
                        2 => client.timing(&stat, i, 1.0).unwrap(),
                        3 => {
                            // explicit flushes race with appends from other threads
                            client.flush().unwrap();
                        }
                        _ => unreachable!(),
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    client.flush().unwrap();

    let mut lines = 0;
    for packet in sink.packets() {
        assert!(packet.len() <= 256);
        for line in packet.split('\n') {
            let (stat, rest) = line.split_once(':').expect("line without ':'");
            assert!(stat.starts_with("parallel."), "corrupted stat in {line:?}");
            let (value, kind) = rest.split_once('|').expect("line without '|'");
            assert!(value.parse::<i64>().is_ok(), "corrupted value in {line:?}");
            assert!(matches!(kind, "c" | "g" | "ms"), "corrupted type in {line:?}");
            lines += 1;
        }
    }
    assert_eq!(lines, num_threads * iterations_per_thread / 4 * 3);
}

#[test]
fn test_sampled_parallel_lines_are_well_formed() {
    let sink = RecordingSink::default();
    let client = Arc::new(Client::with_size(sink.clone(), 512));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            thread::spawn(move || {
                for _ in 0..5_000 {
                    client.increment("sampled", 1, 0.3).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    client.close().unwrap();

    for packet in sink.packets() {
        for line in packet.split('\n') {
            assert_eq!(line, "sampled:1|c|@0.3");
        }
    }
}
