use std::sync::Arc;
use std::thread;

use live_oc::prelude::*;
use parking_lot::Mutex;

type Calls = Arc<Mutex<Vec<(u32, u32, u32)>>>;

fn recording_store() -> (Arc<ConfigStore>, Calls) {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let policy = FnPolicy::new(move |value, low, high| sink.lock().push((value, low, high)));
    (Arc::new(ConfigStore::new(Arc::new(policy))), calls)
}

#[test]
fn test_example_trace() {
    let (store, calls) = recording_store();
    assert_eq!(store.snapshot(), OverclockSettings { value: 100, low_freq: 800_000, high_freq: 2_000_000 });

    assert!(store.write_intensity("120\n").is_applied());
    assert_eq!(store.snapshot(), OverclockSettings { value: 120, low_freq: 800_000, high_freq: 2_000_000 });
    assert_eq!(*calls.lock(), vec![(120, 800_000, 2_000_000)]);

    assert!(store.write_high_bound("1900000\n").is_applied());
    assert_eq!(store.snapshot(), OverclockSettings { value: 120, low_freq: 800_000, high_freq: 1_900_000 });
    assert_eq!(calls.lock().last(), Some(&(120, 800_000, 1_900_000)));

    let ack = store.write_intensity("200\n");
    assert!(matches!(ack.outcome, WriteOutcome::Rejected(Error::InvalidRange(200))));
    assert_eq!(store.snapshot(), OverclockSettings { value: 120, low_freq: 800_000, high_freq: 1_900_000 });
    assert_eq!(calls.lock().len(), 2);
}

#[test]
fn test_every_in_range_intensity_propagates_once() {
    let (store, calls) = recording_store();

    for value in (101..=150).chain(100..=100) {
        let ack = store.write_intensity(value.to_string());
        assert!(ack.is_applied(), "value {value}");
    }
    let recorded = calls.lock();
    assert_eq!(recorded.len(), 51);
    assert!(recorded.iter().all(|&(_, low, high)| low == 800_000 && high == 2_000_000));
    assert_eq!(store.read_intensity(), "100\n");
}

#[test]
fn test_asymmetric_same_value_handling() {
    let (store, calls) = recording_store();

    assert!(matches!(store.write_intensity("100").outcome, WriteOutcome::Unchanged));
    assert!(store.write_low_bound("800000").is_rejected());
    assert!(store.write_high_bound("2000000").is_rejected());
    assert!(calls.lock().is_empty());
}

#[test]
fn test_malformed_writes_consume_everything() {
    let (store, calls) = recording_store();
    let attrs = AttributeGroup::new(Arc::clone(&store));

    for attr in [Attribute::OcValue, Attribute::OcTargetLow, Attribute::OcTargetHigh] {
        let ack = attrs.store(attr, "turbo please\n").unwrap();
        assert_eq!(ack.consumed, 13);
        assert!(matches!(ack.outcome, WriteOutcome::Rejected(Error::InvalidInput)));
    }
    assert_eq!(store.snapshot(), OverclockSettings::default());
    assert!(calls.lock().is_empty());
}

#[test]
fn test_concurrent_writes_propagate_consistent_snapshots() {
    let (store, calls) = recording_store();

    let handles: Vec<_> = (0..8u32)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut applied = 0usize;
                for round in 0..50u32 {
                    let ack = match round % 3 {
                        0 => store.write_intensity((100 + (i * 7 + round) % 51).to_string()),
                        1 => store.write_low_bound((700_000 + i * 1_000 + round).to_string()),
                        _ => store.write_high_bound((1_800_000 + i * 1_000 + round).to_string()),
                    };
                    if ack.is_applied() {
                        applied += 1;
                    }
                }
                applied
            })
        })
        .collect();

    let applied: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    let recorded = calls.lock();
    assert_eq!(recorded.len(), applied);

    let last = *recorded.last().unwrap();
    let snapshot = store.snapshot();
    assert_eq!(last, (snapshot.value, snapshot.low_freq, snapshot.high_freq));
    assert!((100..=150).contains(&snapshot.value));
}

#[test]
fn test_device_start_with_local_registry() -> Result<()> {
    let registry = LocalRegistry::default();
    let settings = Settings { device_name: "liveoc-test".to_string(), ..Settings::default() };
    let device = LiveOcDevice::init(&registry, &settings, Arc::new(LoggingPolicy))?;

    assert!(registry.is_registered("liveoc-test"));
    assert_eq!(registry.published("liveoc-test"), Attribute::ALL.to_vec());
    assert_eq!(device.handle().name, "liveoc-test");

    let attrs = device.attributes();
    attrs.store_by_name("oc_target_low", "600000")?;
    assert_eq!(attrs.show_by_name("oc_target_low")?, "600000\n");
    assert!(matches!(attrs.store_by_name("version", "2"), Err(Error::ReadOnly(Attribute::Version))));

    // A second device under the same name cannot be registered.
    let err = LiveOcDevice::init(&registry, &settings, Arc::new(LoggingPolicy)).unwrap_err();
    assert!(matches!(err, Error::Registration(_)));
    Ok(())
}

#[test]
fn test_snapshot_serializes() {
    let (store, _calls) = recording_store();
    store.write_intensity("130");

    let json = serde_json::to_value(store.snapshot()).unwrap();
    assert_eq!(json, serde_json::json!({ "value": 130, "low_freq": 800_000, "high_freq": 2_000_000 }));
}
