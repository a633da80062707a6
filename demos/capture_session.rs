use scankit::export::CaptureReport;
use scankit::record::Advertisement;
use scankit::store::DeviceHistoryStore;

fn main() {
    // Keep at most 4 devices, 3 advertisements each
    let mut store = DeviceHistoryStore::new(4, 3);

    // Simulate a short capture session
    let packets = [
        ("aa:bb:cc:00:00:01", -48, vec![0x02, 0x01, 0x06]),
        ("aa:bb:cc:00:00:02", -71, vec![0x03, 0x03, 0x0F, 0x18]),
        ("aa:bb:cc:00:00:01", -52, vec![0x02, 0x01, 0x06]),
        ("aa:bb:cc:00:00:03", -80, vec![0x05, 0x16, 0x09, 0x18, 0x2A]),
    ];

    for (id, rssi, payload) in packets {
        let result = store
            .ingest(Advertisement::new(id, rssi, payload).with_local_name("Demo Beacon"))
            .expect("well-formed advertisement");
        if result.is_new_device {
            println!("New device discovered: {id}");
        }
    }

    println!(
        "Tracked {} devices ({} observed in total)",
        store.len(),
        store.total_observed()
    );

    // Export the whole session as JSON evidence
    let report = CaptureReport::from_store(&store);
    println!("{}", report.to_json_string().expect("serializable report"));
}
