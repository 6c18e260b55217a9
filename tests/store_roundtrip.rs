use std::fs;

use exomast_client::{Error, IdentifierRecord, LookupStore};
use tempfile::tempdir;

fn sample_record() -> IdentifierRecord {
    IdentifierRecord {
        canonical_name: "HD 189733 b".to_string(),
        star_name: "HD 189733".to_string(),
        right_ascension: Some(300.1821249961853),
        declination: Some(22.71146111064487),
        alternate_names: vec!["HIP 98505 b".to_string(), "Wolf 864 b".to_string()],
        kepler_id: None,
        kepler_tce_count: None,
        tess_id: Some(256364928),
        tess_tce_count: None,
    }
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().expect("temp dir");
    let store = LookupStore::at(dir.path());
    let record = sample_record();

    let path = store.save(&record).expect("save succeeds");
    assert!(path.exists());

    let loaded = store
        .load("HD 189733 b")
        .expect("load succeeds")
        .expect("record present");
    assert_eq!(loaded, record);
}

#[test]
fn load_of_unsaved_name_returns_none() {
    let dir = tempdir().expect("temp dir");
    let store = LookupStore::at(dir.path());

    let loaded = store.load("WASP-12 b").expect("load succeeds");
    assert!(loaded.is_none());
}

#[test]
fn save_replaces_an_existing_record() {
    let dir = tempdir().expect("temp dir");
    let store = LookupStore::at(dir.path());

    let mut record = sample_record();
    store.save(&record).expect("first save succeeds");

    record.tess_tce_count = Some(2);
    store.save(&record).expect("second save succeeds");

    let loaded = store
        .load("HD 189733 b")
        .expect("load succeeds")
        .expect("record present");
    assert_eq!(loaded.tess_tce_count, Some(2));
}

#[test]
fn corrupt_saved_file_is_reported() {
    let dir = tempdir().expect("temp dir");
    let store = LookupStore::at(dir.path());

    let path = store.record_path("HD 189733 b");
    fs::write(&path, "not json at all").expect("seed file writes");

    let err = store.load("HD 189733 b").expect_err("load fails");
    match err {
        Error::SavedLookupCorrupt { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}
