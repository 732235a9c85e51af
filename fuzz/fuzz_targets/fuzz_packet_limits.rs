#![no_main]

use libfuzzer_sys::fuzz_target;
use rylv_statsd::{OverflowPolicy, PacketBuffer};
use std::io;

struct PacketCheck {
    capacity: usize,
    current: Vec<u8>,
    oversize: usize,
}

impl io::Write for PacketCheck {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.current.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        assert!(!self.current.is_empty(), "empty packet written");
        assert!(self.current.first() != Some(&b'\n'), "leading newline");
        assert!(self.current.last() != Some(&b'\n'), "trailing newline");
        if self.current.len() > self.capacity {
            // only a single oversize line may exceed the capacity
            assert!(!self.current.contains(&b'\n'));
            self.oversize += 1;
        }
        self.current.clear();
        Ok(())
    }
}

// Fuzz target checking the packet size invariant
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let capacity = usize::from(u16::from_le_bytes([data[0], data[1]]) % 2048);
    let sink = PacketCheck {
        capacity: if capacity == 0 { 512 } else { capacity },
        current: Vec::new(),
        oversize: 0,
    };
    let mut buffer = PacketBuffer::new(sink, capacity, OverflowPolicy::Propagate);

    let mut long_lines = 0;
    for line in data[2..].split(|b| *b == b'\n').filter(|l| !l.is_empty()) {
        if line.len() > buffer.capacity() {
            long_lines += 1;
        }
        buffer.append(line).unwrap();
        assert!(buffer.buffered() <= buffer.capacity());
    }
    let sink = buffer.close().unwrap();
    assert!(sink.current.is_empty());
    // every line above the capacity went out alone, nothing else did
    assert_eq!(sink.oversize, long_lines);
});
