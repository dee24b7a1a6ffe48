// Row-by-row import against in-memory stores.

mod common;

use common::{FlakyStore, roster, with_files};
use std::path::Path;
use vrnt_core::{Category, UploadPolicy};
use vrnt_import::{Cell, RowOutcome, Worksheet, import_rows, import_workbook};
use vrnt_records::RecordStore;
use vrnt_storage::MemoryBackend;

#[tokio::test]
async fn failed_row_does_not_stop_the_batch() {
    let records = FlakyStore::rejecting(&["VRNT102"]);
    let storage = MemoryBackend::default();
    let sheet = roster(&[
        ("VRNT101", "Anantha Krishnan", "P"),
        ("VRNT102", "Badri Narayanan", "S"),
        ("VRNT103", "Chandrasekhar", ""),
    ]);

    let report = import_rows(&records, &storage, &UploadPolicy::default(), &sheet).await;

    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.total(), 3);
    assert_eq!(records.inserts(), 3);

    let failed = &report.rows[1];
    assert_eq!(failed.row, 3);
    assert_eq!(failed.uid.as_deref(), Some("VRNT102"));
    match &failed.outcome {
        RowOutcome::Failed { reason } => assert!(reason.contains("check constraint")),
        other => panic!("unexpected outcome: {other:?}"),
    }

    let stored = records.inner.rows().await;
    let uids: Vec<_> = stored.iter().map(|r| r.uid.as_deref().unwrap()).collect();
    assert_eq!(uids, vec!["VRNT101", "VRNT103"]);
    assert_eq!(stored[0].category, Some(Category::P));
    assert_eq!(stored[1].category, Some(Category::S));
}

#[tokio::test]
async fn blank_rows_are_skipped_and_not_counted() {
    let records = FlakyStore::new();
    let storage = MemoryBackend::default();
    let mut sheet = roster(&[("VRNT104", "Dattatreya", "P")]);
    sheet.push_row(3, vec![Cell::Empty, Cell::Text("  ".into())]);
    sheet.push_row(4, Vec::new());

    let report = import_rows(&records, &storage, &UploadPolicy::default(), &sheet).await;

    assert_eq!(report.total(), 1);
    assert_eq!(records.inserts(), 1);
}

#[tokio::test]
async fn missing_file_is_skipped_row_still_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("photo.jpg");
    std::fs::write(&photo, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
    let missing = dir.path().join("certificate.pdf");

    let records = FlakyStore::new();
    let storage = MemoryBackend::default();
    let sheet = with_files(
        "VRNT105",
        photo.to_str().unwrap(),
        missing.to_str().unwrap(),
    );

    let report = import_rows(&records, &storage, &UploadPolicy::default(), &sheet).await;

    assert_eq!(report.succeeded, 1);
    match &report.rows[0].outcome {
        RowOutcome::Imported { documents, .. } => assert_eq!(*documents, 1),
        other => panic!("unexpected outcome: {other:?}"),
    }

    let record = &records.inner.rows().await[0];
    let url = record.passport_photo_url.as_deref().unwrap();
    assert!(url.starts_with(&format!("memory://vrnt-uploads/{}/passport/", record.id)));
    assert!(record.certificate_url.is_none());

    let keys = storage.keys().await;
    assert_eq!(keys.len(), 1);
    assert!(keys[0].ends_with(".jpg"));
    assert_eq!(storage.object(&keys[0]).await.unwrap().content_type, "image/jpeg");
    assert_eq!(records.updates(), 1);
}

#[tokio::test]
async fn rejected_document_type_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let scan = dir.path().join("photo.pdf");
    std::fs::write(&scan, b"%PDF-1.4").unwrap();

    let records = FlakyStore::new();
    let storage = MemoryBackend::default();
    let sheet = with_files("VRNT106", scan.to_str().unwrap(), "");

    let report = import_rows(&records, &storage, &UploadPolicy::default(), &sheet).await;

    assert_eq!(report.succeeded, 1);
    assert!(storage.keys().await.is_empty());
    assert_eq!(records.updates(), 0);
    assert!(records.inner.rows().await[0].passport_photo_url.is_none());
}

#[tokio::test]
async fn failed_url_attach_still_counts_as_success() {
    let dir = tempfile::tempdir().unwrap();
    let certificate = dir.path().join("certificate.pdf");
    std::fs::write(&certificate, b"%PDF-1.4").unwrap();

    let records = FlakyStore::rejecting_updates();
    let storage = MemoryBackend::default();
    let sheet = with_files("VRNT107", "", certificate.to_str().unwrap());

    let report = import_rows(&records, &storage, &UploadPolicy::default(), &sheet).await;

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 0);
    assert_eq!(records.updates(), 1);
    assert_eq!(storage.keys().await.len(), 1);
    assert!(records.inner.rows().await[0].certificate_url.is_none());
}

#[tokio::test]
async fn unknown_headers_only_rows_still_insert() {
    let records = FlakyStore::new();
    let storage = MemoryBackend::default();
    let mut sheet = Worksheet::new("Students", vec!["Remarks".into()]);
    sheet.push_row(2, vec!["walk-in".into()]);

    let report = import_rows(&records, &storage, &UploadPolicy::default(), &sheet).await;

    assert_eq!(report.succeeded, 1);
    let record = &records.inner.rows().await[0];
    assert!(record.uid.is_none());
    assert_eq!(record.category, Some(Category::S));
    assert!(records.find_by_uid("walk", 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn unreadable_workbook_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.xlsx");
    std::fs::write(&path, b"not a spreadsheet").unwrap();

    let records = FlakyStore::new();
    let storage = MemoryBackend::default();

    assert!(
        import_workbook(&records, &storage, &UploadPolicy::default(), &path)
            .await
            .is_err()
    );
    assert!(
        import_workbook(
            &records,
            &storage,
            &UploadPolicy::default(),
            Path::new("/nonexistent.xlsx")
        )
        .await
        .is_err()
    );
    assert_eq!(records.inserts(), 0);
}
