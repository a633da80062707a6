// Concurrency tests for the RwLock-wrapped store. The core assumes a single
// logical writer; the wrapper is what multi-threaded embedders use, so these
// tests drive it from several threads at once.
#![cfg(feature = "concurrency")]

use std::sync::Arc;
use std::thread;

use scankit::record::Advertisement;
use scankit::store::ConcurrentHistoryStore;

#[test]
fn parallel_ingest_respects_device_ceiling() {
    let store = Arc::new(ConcurrentHistoryStore::new(8, 4));
    let mut handles = Vec::new();

    for t in 0..4u32 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for n in 0..100u32 {
                let id = format!("dev-{}", (t * 100 + n) % 16);
                store
                    .ingest(Advertisement::new(id, -50, n))
                    .expect("well-formed advertisement");
                assert!(store.len() <= 8);
            }
        }));
    }

    for handle in handles {
        handle.join().expect("ingest thread panicked");
    }

    assert!(store.len() <= 8);
    assert!(store.total_observed() >= store.len() as u64);
}

#[test]
fn export_runs_while_ingest_threads_are_live() {
    let store = Arc::new(ConcurrentHistoryStore::new(4, 4));
    let mut handles = Vec::new();

    for t in 0..2u32 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for n in 0..200u32 {
                let id = format!("dev-{}", (t * 3 + n) % 10);
                store.ingest(Advertisement::new(id, -60, n)).unwrap();
            }
        }));
    }

    // Snapshots taken mid-churn must always be internally consistent
    for _ in 0..50 {
        let snapshot = store.export_snapshot();
        assert!(snapshot.len() <= 4);
        for device in &snapshot {
            assert!(device.advertisement_history.len() <= 4);
            assert!(device.first_seen <= device.last_seen);
        }
    }

    for handle in handles {
        handle.join().expect("ingest thread panicked");
    }
}

#[test]
fn distinct_devices_from_many_threads_all_counted() {
    let store = Arc::new(ConcurrentHistoryStore::new(64, 2));
    let mut handles = Vec::new();

    for t in 0..4u32 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for n in 0..16u32 {
                let id = format!("thread-{t}-dev-{n}");
                let result = store.ingest(Advertisement::new(id, -50, n)).unwrap();
                assert!(result.is_new_device);
            }
        }));
    }

    for handle in handles {
        handle.join().expect("ingest thread panicked");
    }

    assert_eq!(store.len(), 64);
    assert_eq!(store.total_observed(), 64);
}
