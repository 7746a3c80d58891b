use std::path::PathBuf;

use designer_timeline::element::ElementContent;
use designer_timeline::state::{DesignSnapshot, SnapshotStore};
use designer_timeline::timeline::Phase;
use designer_timeline::{DesignStore, Element, PropertyKey, PropertyMap, PropertyValue};

// Unique scratch directory per test
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("designer_timeline_{name}_{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn sample_store() -> DesignStore {
    let mut store = DesignStore::new();
    let element_id = store.add_element(Element::new("Title", ElementContent::default()));
    let animation_id = store.add_animation(element_id, Phase::In).unwrap();
    store
        .add_keyframe(
            animation_id,
            100,
            PropertyMap::from([(PropertyKey::Opacity, PropertyValue::Number(1.0))]),
        )
        .unwrap();
    store
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = scratch_dir("round_trip");
    let snapshots = SnapshotStore::new(&dir);
    let store = sample_store();

    snapshots.save(&store, "design").unwrap();
    assert_eq!(snapshots.list().unwrap(), vec!["design".to_owned()]);

    let mut restored = DesignStore::new();
    snapshots.load("design").unwrap().restore(&mut restored);
    assert_eq!(restored.snapshot(), store.snapshot());
    assert!(!restored.can_undo());

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_load_missing_snapshot_fails() {
    let dir = scratch_dir("missing");
    let snapshots = SnapshotStore::new(&dir);
    assert!(snapshots.load("nope").is_err());
    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_snapshot_records_version() {
    let snapshot = DesignSnapshot::new(&sample_store());
    assert_eq!(snapshot.version, env!("CARGO_PKG_VERSION"));
    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: DesignSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, snapshot);
}

#[test]
fn test_autosave_respects_interval() {
    let dir = scratch_dir("autosave");
    let mut snapshots = SnapshotStore::new(&dir).with_autosave(3600, 2);
    let store = sample_store();

    assert!(snapshots.try_autosave(&store).unwrap());
    // Interval has not elapsed
    assert!(!snapshots.try_autosave(&store).unwrap());
    assert_eq!(snapshots.list().unwrap().len(), 1);
    assert!(snapshots.find_latest_autosave().unwrap().is_some());

    std::fs::remove_dir_all(dir).ok();
}
