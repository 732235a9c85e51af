use crate::RecordingSink;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rylv_statsd::{Client, FixedSource, RandomSource, Sampler};
use std::sync::Mutex;

/// Deterministic source for statistical assertions.
struct SeededSource(Mutex<StdRng>);

impl RandomSource for SeededSource {
    fn next_unit(&self) -> f64 {
        self.0.lock().unwrap().gen::<f64>()
    }
}

fn emitted_lines(client: &Client<RecordingSink>, sink: &RecordingSink) -> Vec<String> {
    client.flush().unwrap();
    sink.packets()
        .iter()
        .flat_map(|packet| packet.split('\n').map(str::to_string).collect::<Vec<_>>())
        .collect()
}

#[test]
fn test_full_rate_has_no_suffix() {
    let sink = RecordingSink::default();
    let client = Client::with_size(sink.clone(), 4096);
    for rate in [1.0, 1.5, 10.0] {
        for _ in 0..10 {
            client.increment("hits", 1, rate).unwrap();
        }
    }
    let lines = emitted_lines(&client, &sink);
    assert_eq!(lines.len(), 30);
    assert!(lines.iter().all(|line| line == "hits:1|c"));
}

#[test]
fn test_emission_fraction_converges_to_rate() {
    let sink = RecordingSink::default();
    let client = Client::with_size(sink.clone(), 1432)
        .with_sampler(Sampler::new(SeededSource(Mutex::new(StdRng::seed_from_u64(7)))));

    let calls = 20_000;
    for _ in 0..calls {
        client.increment("hits", 1, 0.25).unwrap();
    }
    let lines = emitted_lines(&client, &sink);

    let fraction = lines.len() as f64 / f64::from(calls);
    assert!(
        (fraction - 0.25).abs() < 0.02,
        "emission fraction {fraction} too far from 0.25"
    );
    assert!(lines.iter().all(|line| line == "hits:1|c|@0.25"));
}

#[test]
fn test_default_sampler_respects_rate() {
    let sink = RecordingSink::default();
    let client = Client::with_size(sink.clone(), 1432);
    let calls = 20_000;
    for _ in 0..calls {
        client.timing("t", 1, 0.5).unwrap();
    }
    let lines = emitted_lines(&client, &sink);
    let fraction = lines.len() as f64 / f64::from(calls);
    assert!((fraction - 0.5).abs() < 0.05, "fraction {fraction}");
    assert!(lines.iter().all(|line| line == "t:1|ms|@0.5"));
}

#[test]
fn test_sample_miss_is_success() {
    let sink = RecordingSink::default();
    let client = Client::new(sink.clone()).with_sampler(Sampler::new(FixedSource(0.99)));
    client.increment("hits", 1, 0.1).unwrap();
    client.gauge("g", 1, 0.0).unwrap();
    client.unique("u", 1, -2.0).unwrap();
    assert_eq!(client.flush().unwrap(), 0);
    assert!(sink.packets().is_empty());
}

#[test]
fn test_rate_suffix_on_every_kind() {
    let sink = RecordingSink::default();
    let client = Client::new(sink.clone()).with_sampler(Sampler::new(FixedSource(0.0)));
    client.increment("c", 2, 0.1).unwrap();
    client.timing("t", 3, 0.1).unwrap();
    client.gauge("g", 4, 0.1).unwrap();
    client.increment_gauge("g", 1, 0.1).unwrap();
    client.unique("s", 5, 0.1).unwrap();
    let lines = emitted_lines(&client, &sink);
    assert_eq!(
        lines,
        vec![
            "c:2|c|@0.1",
            "t:3|ms|@0.1",
            "g:4|g|@0.1",
            "g:+1|g|@0.1",
            "s:5|s|@0.1",
        ]
    );
}
