//! Per-row import: insert the record, upload its documents, attach the URLs.

use crate::error::ImportResult;
use crate::mapping::map_row;
use crate::sheet::{RowView, Worksheet, load_first_worksheet};
use bytes::Bytes;
use serde::Serialize;
use std::path::Path;
use vrnt_core::{DocumentKind, StudentId, StudentPatch, UploadPolicy};
use vrnt_records::RecordStore;
use vrnt_storage::{ObjectStore, upload_document};

/// What happened to one data row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowOutcome {
    Imported { id: String, documents: usize },
    Failed { reason: String },
}

#[derive(Clone, Debug, Serialize)]
pub struct RowReport {
    pub row: u32,
    pub uid: Option<String>,
    pub outcome: RowOutcome,
}

/// Summary of an import pass. Blank rows are not counted.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ImportReport {
    pub succeeded: usize,
    pub failed: usize,
    pub rows: Vec<RowReport>,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    fn push(&mut self, report: RowReport) {
        match report.outcome {
            RowOutcome::Imported { .. } => self.succeeded += 1,
            RowOutcome::Failed { .. } => self.failed += 1,
        }
        self.rows.push(report);
    }
}

/// Load the first worksheet of `path` and import every row.
///
/// Only an unreadable workbook is an error; row failures land in the report.
pub async fn import_workbook(
    records: &dyn RecordStore,
    storage: &dyn ObjectStore,
    policy: &UploadPolicy,
    path: &Path,
) -> ImportResult<ImportReport> {
    let sheet = load_first_worksheet(path)?;
    tracing::info!(
        path = %path.display(),
        sheet = %sheet.name,
        rows = sheet.row_count(),
        "starting import"
    );
    Ok(import_rows(records, storage, policy, &sheet).await)
}

/// Import every non-blank row of `sheet`, one at a time.
pub async fn import_rows(
    records: &dyn RecordStore,
    storage: &dyn ObjectStore,
    policy: &UploadPolicy,
    sheet: &Worksheet,
) -> ImportReport {
    let mut report = ImportReport::default();
    for row in sheet.rows().filter(RowView::has_values) {
        let row_report = import_row(records, storage, policy, &row).await;
        report.push(row_report);
    }
    tracing::info!(
        succeeded = report.succeeded,
        failed = report.failed,
        total = report.total(),
        "import finished"
    );
    report
}

async fn import_row(
    records: &dyn RecordStore,
    storage: &dyn ObjectStore,
    policy: &UploadPolicy,
    row: &RowView<'_>,
) -> RowReport {
    let uid = row.text("UID");
    let failed = |reason: String| RowReport {
        row: row.number,
        uid: uid.clone(),
        outcome: RowOutcome::Failed { reason },
    };

    let mapped = match map_row(row) {
        Ok(mapped) => mapped,
        Err(e) => {
            tracing::error!(row = row.number, error = %e, "row rejected");
            return failed(e.to_string());
        }
    };

    let created = match records.insert(&mapped.patch).await {
        Ok(record) => record,
        Err(e) => {
            tracing::error!(row = row.number, error = %e, "insert failed");
            return failed(e.to_string());
        }
    };
    tracing::info!(
        row = row.number,
        id = %created.id,
        name = created.name_aadhar.as_deref().unwrap_or("Unknown"),
        "created student"
    );

    let mut urls = StudentPatch::default();
    for (kind, path) in &mapped.documents {
        if let Some(url) = upload_file(storage, policy, &created.id, *kind, path, row.number).await {
            urls.set_document_url(*kind, url);
        }
    }

    let attached = urls.len();
    if attached > 0 {
        // The record already exists, so a failed attach does not fail the row.
        match records.update(&created.id, &urls).await {
            Ok(_) => tracing::info!(row = row.number, files = attached, "documents attached"),
            Err(e) => tracing::warn!(row = row.number, error = %e, "could not attach document URLs"),
        }
    }

    RowReport {
        row: row.number,
        uid,
        outcome: RowOutcome::Imported {
            id: created.id.to_string(),
            documents: attached,
        },
    }
}

async fn upload_file(
    storage: &dyn ObjectStore,
    policy: &UploadPolicy,
    owner: &StudentId,
    kind: DocumentKind,
    path: &Path,
    row: u32,
) -> Option<String> {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(row, path = %path.display(), "file not found");
            return None;
        }
        Err(e) => {
            tracing::warn!(row, path = %path.display(), error = %e, "cannot read file");
            return None;
        }
    };

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let size = data.len() as u64;
    match upload_document(storage, policy, owner, Bytes::from(data), kind, mime.essence_str(), size)
        .await
    {
        Ok(uploaded) => Some(uploaded.public_url),
        Err(e) => {
            tracing::warn!(row, path = %path.display(), kind = %kind, error = %e, "upload failed");
            None
        }
    }
}
