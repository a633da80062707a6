// ==============================================
// CAPTURE FLOW TESTS (integration)
// ==============================================
//
// End-to-end scenarios exercising ingest, eviction, history overwrite and
// export together through the public surface. These span multiple modules
// and belong here rather than in any single source file.

use scankit::export::{ADVISORY_TEXT, CaptureReport};
use scankit::record::Advertisement;
use scankit::store::DeviceHistoryStore;

fn adv(id: &str, rssi: i16, payload: u32) -> Advertisement<u32> {
    Advertisement::new(id, rssi, payload)
}

// ==============================================
// Two-level eviction
// ==============================================

#[test]
fn two_device_store_with_three_record_histories() {
    let mut store = DeviceHistoryStore::new(2, 3);

    let new_flags: Vec<bool> = [("a", 1), ("b", 2), ("a", 3)]
        .iter()
        .map(|(id, n)| store.ingest(adv(id, -40, *n)).unwrap().is_new_device)
        .collect();
    assert_eq!(new_flags, vec![true, true, false]);

    let a_payloads: Vec<u32> = store
        .get("a")
        .unwrap()
        .history()
        .iter()
        .map(|rec| rec.payload)
        .collect();
    assert_eq!(a_payloads, vec![1, 3]);

    // A fourth identifier evicts "a", the earliest inserted
    assert!(store.ingest(adv("c", -41, 4)).unwrap().is_new_device);
    assert!(!store.contains("a"));
    assert!(store.contains("b"));
    assert!(store.contains("c"));
    assert_eq!(store.len(), 2);
}

#[test]
fn sustained_churn_respects_both_ceilings() {
    let mut store = DeviceHistoryStore::new(3, 2);

    for n in 0..50u32 {
        let id = format!("dev-{}", n % 7);
        store.ingest(adv(&id, -50, n)).unwrap();
        assert!(store.len() <= 3);
        for (_, record) in store.iter() {
            assert!(record.history().len() <= 2);
        }
    }
}

// ==============================================
// Export shape
// ==============================================

#[test]
fn export_flattens_history_oldest_first() {
    let mut store = DeviceHistoryStore::new(2, 2);
    for payload in [1u32, 2, 3] {
        store.ingest(adv("dev-a", -55, payload)).unwrap();
    }

    let snapshot = store.export_snapshot();
    assert_eq!(snapshot.len(), 1);
    let payloads: Vec<u32> = snapshot[0]
        .advertisement_history
        .iter()
        .map(|rec| rec.payload)
        .collect();
    assert_eq!(payloads, vec![2, 3]);
}

#[test]
fn export_is_a_pure_read() {
    let mut store = DeviceHistoryStore::new(2, 2);
    store.ingest(adv("dev-a", -50, 1)).unwrap();
    store.ingest(adv("dev-b", -51, 2)).unwrap();

    let before: Vec<String> = store.iter().map(|(id, _)| id.to_string()).collect();
    let _ = store.export_snapshot();
    let _ = store.export_snapshot();
    let after: Vec<String> = store.iter().map(|(id, _)| id.to_string()).collect();

    assert_eq!(before, after);
    assert_eq!(store.total_observed(), 2);
}

#[test]
fn report_json_has_the_documented_shape() {
    let mut store = DeviceHistoryStore::new(4, 4);
    store
        .ingest(
            Advertisement::new("dev-a", -60, vec![0xABu8])
                .with_local_name("Sensor")
                .with_company_id(0x0059),
        )
        .unwrap();

    let report = CaptureReport::from_store(&store);
    let json: serde_json::Value = serde_json::from_str(&report.to_json_string().unwrap()).unwrap();

    assert_eq!(json["advisory"], ADVISORY_TEXT);
    assert_eq!(json["device_count"], 1);
    assert_eq!(json["total_observed"], 1);

    let device = &json["devices"][0];
    assert_eq!(device["device_id"], "dev-a");
    assert_eq!(device["local_name"], "Sensor");
    assert_eq!(device["company_id"], 0x0059);
    assert!(device["first_seen"].is_string());
    assert!(device["last_seen"].is_string());

    let history = device["advertisement_history"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["rssi"], -60);
    assert!(history[0]["timestamp"].is_string());
    assert_eq!(history[0]["payload"][0], 0xAB);
}

// ==============================================
// Session restart
// ==============================================

#[test]
fn clear_starts_a_fresh_capture_session() {
    let mut store = DeviceHistoryStore::new(2, 2);
    store.ingest(adv("dev-a", -50, 1)).unwrap();
    store.ingest(adv("dev-b", -51, 2)).unwrap();
    store.ingest(adv("dev-c", -52, 3)).unwrap();
    assert_eq!(store.total_observed(), 3);

    store.clear();
    assert!(store.export_snapshot().is_empty());
    assert_eq!(store.total_observed(), 0);

    // Previously evicted and previously retained ids are both unseen now
    assert!(store.ingest(adv("dev-a", -53, 4)).unwrap().is_new_device);
    assert!(store.ingest(adv("dev-c", -54, 5)).unwrap().is_new_device);
}

// ==============================================
// Error paths leave no partial state
// ==============================================

#[test]
fn rejected_ingest_mutates_nothing() {
    let mut store = DeviceHistoryStore::new(2, 2);
    store.ingest(adv("dev-a", -50, 1)).unwrap();

    let snapshot_before = store.export_snapshot();
    assert!(store.ingest(adv("", -60, 2)).is_err());
    let snapshot_after = store.export_snapshot();

    assert_eq!(snapshot_before, snapshot_after);
    assert_eq!(store.total_observed(), 1);
}
