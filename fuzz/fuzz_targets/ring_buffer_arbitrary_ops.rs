#![no_main]

use libfuzzer_sys::fuzz_target;
use scankit::ds::RingBuffer;

// Fuzz arbitrary operation sequences on RingBuffer
//
// Tests random sequences of push, peek, iterate and clear operations to
// find edge cases and invariant violations.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // Use first byte to determine capacity (1-32)
    let capacity = ((data[0] % 32) as usize).max(1);
    let mut ring: RingBuffer<u64> = RingBuffer::new(capacity);

    let mut idx = 1;
    while idx + 1 < data.len() {
        let op = data[idx] % 6;
        let value = u64::from(data[idx + 1]);

        match op {
            0 => {
                ring.push(value);
            }
            1 => {
                let oldest = ring.oldest();
                if ring.is_empty() {
                    assert!(oldest.is_none());
                } else {
                    assert!(oldest.is_some());
                }
            }
            2 => {
                let latest = ring.latest();
                if ring.is_empty() {
                    assert!(latest.is_none());
                } else {
                    assert!(latest.is_some());
                }
            }
            3 => {
                let collected: Vec<u64> = ring.iter().copied().collect();
                assert_eq!(collected.len(), ring.len());
                assert_eq!(collected, ring.to_vec());
            }
            4 => {
                ring.clear();
                assert!(ring.is_empty());
            }
            _ => {
                assert_eq!(ring.is_full(), ring.len() == ring.capacity());
            }
        }

        ring.debug_validate_invariants();
        idx += 2;
    }
});
