// Search and update front-door behavior against an in-process store.

mod common;

use common::InstrumentedStore;
use vrnt_core::{Category, StudentId, StudentPatch};
use vrnt_records::{RecordError, RecordStore, search_students, update_student};

fn patch(uid: &str, name: &str) -> StudentPatch {
    let mut patch = StudentPatch::default();
    patch.uid = Some(uid.to_string());
    patch.name_aadhar = Some(name.to_string());
    patch.category = Some(Category::P);
    patch
}

#[tokio::test]
async fn blank_queries_never_reach_the_store() {
    let store = InstrumentedStore::new();
    for query in ["", " ", "\t\n", "   \u{3000}  "] {
        let rows = search_students(&store, query).await.unwrap();
        assert!(rows.is_empty(), "query {query:?}");
    }
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn matches_contain_query_case_insensitively_sorted_by_name() {
    let store = InstrumentedStore::new();
    store.insert(&patch("VRNT010", "Ananthapadmanabhan Iyer")).await.unwrap();
    store.insert(&patch("VRNT001", "Ramakrishna Sharma")).await.unwrap();
    store.insert(&patch("vrnt005", "Srinivasan Iyengar")).await.unwrap();
    store.insert(&patch("XYZ001", "Govindarajan Sastri")).await.unwrap();

    let rows = search_students(&store, "  Vrnt0 ").await.unwrap();
    assert_eq!(rows.len(), 3);
    for row in &rows {
        let uid = row.uid.as_deref().unwrap().to_lowercase();
        assert!(uid.contains("vrnt0"), "{uid}");
    }
    let names: Vec<_> = rows
        .iter()
        .map(|r| r.name_aadhar.clone().unwrap())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[tokio::test]
async fn search_caps_results_at_one_hundred() {
    let store = InstrumentedStore::new();
    for n in 0..130 {
        store
            .insert(&patch(&format!("VRNT{n:04}"), &format!("Student {n:04}")))
            .await
            .unwrap();
    }
    let rows = search_students(&store, "vrnt").await.unwrap();
    assert_eq!(rows.len(), 100);
}

#[tokio::test]
async fn search_matches_uid_only() {
    let store = InstrumentedStore::new();
    store.insert(&patch("VRNT001", "Sharma")).await.unwrap();
    let rows = search_students(&store, "sharma").await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn update_applies_only_supplied_fields() {
    let store = InstrumentedStore::new();
    let created = store.insert(&patch("VRNT002", "Varadharajan Iyer")).await.unwrap();

    let change = StudentPatch::from_assignments(["gothram=Kashyapa"]).unwrap();
    let updated = update_student(&store, &created.id, &change).await.unwrap();

    assert_eq!(updated.gothram.as_deref(), Some("Kashyapa"));
    assert_eq!(updated.name_aadhar.as_deref(), Some("Varadharajan Iyer"));
    assert_eq!(updated.category, Some(Category::P));
    assert_eq!(updated.id, created.id);
}

#[tokio::test]
async fn empty_patch_is_rejected_without_round_trip() {
    let store = InstrumentedStore::new();
    let id = StudentId::new("any").unwrap();
    let err = update_student(&store, &id, &StudentPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RecordError::Invalid(vrnt_core::Error::EmptyPatch)
    ));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn update_of_unknown_id_fails() {
    let store = InstrumentedStore::new();
    let id = StudentId::new("does-not-exist").unwrap();
    let change = StudentPatch::from_assignments(["school=Melkote Veda Patasala"]).unwrap();
    let err = update_student(&store, &id, &change).await.unwrap_err();
    assert!(matches!(err, RecordError::NotFound(_)));
}
