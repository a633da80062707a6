#![no_main]

use libfuzzer_sys::fuzz_target;
use scankit::record::Advertisement;
use scankit::store::DeviceHistoryStore;

// Fuzz arbitrary operation sequences on DeviceHistoryStore
//
// Drives ingest, export, peek and clear in random order and asserts the
// store invariants after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let device_capacity = ((data[0] % 8) as usize).max(1);
    let history_capacity = ((data[1] % 8) as usize).max(1);
    let mut store: DeviceHistoryStore<u8> =
        DeviceHistoryStore::new(device_capacity, history_capacity);

    let mut idx = 2;
    while idx + 1 < data.len() {
        let op = data[idx] % 8;
        let arg = data[idx + 1];

        match op {
            0..=3 => {
                // Ingest dominates, as it does in a live capture
                let id = format!("dev-{}", arg % 12);
                let result = store
                    .ingest(Advertisement::new(id, -(arg as i16), arg))
                    .expect("non-empty id is always accepted");
                let _ = result.is_new_device;
            }
            4 => {
                let snapshot = store.export_snapshot();
                assert_eq!(snapshot.len(), store.len());
                for device in &snapshot {
                    assert!(device.advertisement_history.len() <= history_capacity);
                }
            }
            5 => {
                if let Some((id, record)) = store.peek_oldest() {
                    assert!(store.contains(id));
                    assert!(!record.history().is_empty());
                }
            }
            6 => {
                assert!(
                    store
                        .ingest(Advertisement::new("", -50, arg))
                        .is_err()
                );
            }
            _ => {
                store.clear();
                assert!(store.is_empty());
                assert_eq!(store.total_observed(), 0);
            }
        }

        assert!(store.len() <= device_capacity);
        store.debug_validate_invariants();
        idx += 2;
    }
});
