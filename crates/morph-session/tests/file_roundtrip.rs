//! File-backed persistence tests: a session survives a restart intact.

use morph_core::FeaturePatch;
use morph_core::entities::RawInput;
use morph_core::enums::{ArmTightness, BarStrength};
use morph_session::export::{import_structured, to_structured, to_tabular};
use morph_session::updates::ItemPatch;
use morph_session::{FileStore, KeyValueStore, Persistence, SessionStore};
use pretty_assertions::assert_eq;

const KEY: &str = "hubble-annotations";

fn open(dir: &std::path::Path) -> SessionStore {
    SessionStore::open(Persistence::new(FileStore::new(dir), KEY))
}

fn raw(names: &[&str]) -> Vec<RawInput> {
    names
        .iter()
        .map(|name| RawInput::from_bytes(*name, format!("bytes of {name}").as_bytes()))
        .collect()
}

#[test]
fn session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());

    let ids = store.add_items(raw(&["m51.png", "m87.jpg", "ngc1300.png", "lmc.png"]));
    store.patch_features(
        &ids[0],
        &FeaturePatch::builder()
            .bulge(25.0)
            .arms(ArmTightness::Loose)
            .build(),
    );
    store.apply_preset(&ids[1], "Elliptical").unwrap();
    store.patch_features(&ids[1], &FeaturePatch::builder().elliptical_index(0.0).build());
    store.apply_preset(&ids[2], "SBb").unwrap();
    store.patch_item(
        &ids[2],
        ItemPatch::builder()
            .confidence(95.0)
            .notes("classic bar, two arms")
            .build(),
    );
    store.patch_features(&ids[3], &FeaturePatch::builder().irregular(true).build());

    let reopened = open(dir.path());
    assert_eq!(reopened.session().items(), store.session().items());

    let labels: Vec<_> = reopened
        .session()
        .items()
        .iter()
        .map(|item| item.suggested_label().to_string())
        .collect();
    assert_eq!(labels, ["Sc", "E0", "SBb", "Irr"]);
    assert_eq!(reopened.session().selected_id(), Some(ids[0].as_str()));
}

#[test]
fn stored_value_is_the_structured_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());
    store.add_items(raw(&["a.png", "b.png"]));

    let stored = FileStore::new(dir.path()).get(KEY).unwrap().unwrap();
    assert_eq!(stored, to_structured(store.session()).unwrap());
    assert_eq!(import_structured(&stored).unwrap(), store.session().items());
}

#[test]
fn corrupt_file_starts_empty_and_recovers_on_next_write() {
    let dir = tempfile::tempdir().unwrap();
    let files = FileStore::new(dir.path());
    files.put(KEY, b"\x00\x01 definitely not json").unwrap();

    let mut store = open(dir.path());
    assert!(store.session().is_empty());

    store.add_items(raw(&["fresh.png"]));
    let reopened = open(dir.path());
    assert_eq!(reopened.session().len(), 1);
}

#[test]
fn removal_and_patch_after_removal_persist_consistently() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());
    let ids = store.add_items(raw(&["a.png", "b.png", "c.png"]));

    assert!(store.remove_item(&ids[1]));
    assert!(!store.patch_features(&ids[1], &FeaturePatch::builder().bar(BarStrength::Weak).build()));

    let reopened = open(dir.path());
    let kept: Vec<&str> = reopened.session().items().iter().map(|i| i.id()).collect();
    assert_eq!(kept, [ids[0].as_str(), ids[2].as_str()]);
}

#[test]
fn new_ids_never_reuse_restored_ones() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());
    let first = store.add_items(raw(&["a.png", "b.png"]));

    let mut reopened = open(dir.path());
    let second = reopened.add_items(raw(&["c.png"]));
    assert!(!first.contains(&second[0]));
    assert_eq!(reopened.session().len(), 3);
}

#[test]
fn tabular_export_has_header_and_one_row_per_item() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());
    store.add_items(raw(&["a.png", "b.png", "c.png"]));

    let table = String::from_utf8(to_tabular(store.session())).unwrap();
    let lines: Vec<&str> = table.split('\n').collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "id,name,label,suggestion,confidence,bulge,arms,bar,ring,irregular,ellipticity,s0Likelihood,notes"
    );
}
