#![no_main]

use libfuzzer_sys::fuzz_target;
use scankit::record::Advertisement;
use scankit::store::DeviceHistoryStore;

// Stress ingest against a FIFO reference model
//
// Replays the same identifier stream into the store and into an explicit
// ordered Vec model, then checks retained devices, insertion order and
// is_new_device agreement.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let device_capacity = ((data[0] % 6) as usize).max(1);
    let mut store: DeviceHistoryStore<u8> = DeviceHistoryStore::new(device_capacity, 4);
    let mut model: Vec<String> = Vec::new();
    let mut lifetime = 0u64;

    for &byte in &data[1..] {
        let id = format!("dev-{}", byte % 10);
        let result = store
            .ingest(Advertisement::new(id.clone(), -60, byte))
            .expect("non-empty id is always accepted");

        let was_known = model.contains(&id);
        assert_eq!(result.is_new_device, !was_known);

        if !was_known {
            if model.len() == device_capacity {
                model.remove(0);
            }
            model.push(id);
            lifetime += 1;
        }

        let order: Vec<String> = store.iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(order, model);
        assert_eq!(store.total_observed(), lifetime);
        store.debug_validate_invariants();
    }
});
