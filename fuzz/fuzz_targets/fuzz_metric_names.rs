#![no_main]

use libfuzzer_sys::fuzz_target;
use rylv_statsd::{format_line, Client, Metric};

// Fuzz target for arbitrary stat names and annotation text
fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mid = text
        .char_indices()
        .nth(text.chars().count() / 2)
        .map_or(text.len(), |(i, _)| i);
    let (stat, value) = text.split_at(mid);

    let mut line = String::new();
    format_line("fuzz.", &Metric::counter(stat, 1), Some(0.5), &mut line);
    assert!(line.starts_with("fuzz."));
    assert!(line.ends_with("|c|@0.5"));

    let client = Client::with_size(Vec::<u8>::new(), 64);
    let _ = client.incr(stat);
    let _ = client.annotate(stat, value);
    let _ = client.flush();
});
