//! Sample dataset seeding.

use crate::error::ImportResult;
use serde::Serialize;
use vrnt_core::StudentPatch;
use vrnt_records::RecordStore;

const SAMPLE_STUDENTS: &str = include_str!("../data/sample_students.json");

/// The ten bundled sample students, `VRNT001` to `VRNT010`.
pub fn sample_students() -> ImportResult<Vec<StudentPatch>> {
    Ok(serde_json::from_str(SAMPLE_STUDENTS)?)
}

/// UIDs added, skipped as already present, or failed on insert.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SeedReport {
    pub added: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

/// Insert every candidate whose UID is not already in the store.
///
/// The existence check is one round trip for the whole set; if it fails
/// nothing is inserted. Inserts then run one at a time and a failed insert
/// does not stop the rest.
pub async fn seed_students(
    records: &dyn RecordStore,
    candidates: &[StudentPatch],
) -> ImportResult<SeedReport> {
    let uids: Vec<String> = candidates.iter().filter_map(|c| c.uid.clone()).collect();
    let existing = records.existing_uids(&uids).await?;

    let mut report = SeedReport::default();
    for candidate in candidates {
        let uid = candidate.uid.clone().unwrap_or_default();
        if existing.contains(&uid) {
            report.skipped.push(uid);
            continue;
        }
        match records.insert(candidate).await {
            Ok(record) => {
                tracing::info!(uid = %uid, id = %record.id, "sample student added");
                report.added.push(uid);
            }
            Err(e) => {
                tracing::error!(uid = %uid, error = %e, "sample student insert failed");
                report.failed.push(uid);
            }
        }
    }

    if report.added.is_empty() && report.failed.is_empty() {
        tracing::info!("all sample students already exist");
    }
    Ok(report)
}

/// Seed the bundled sample dataset.
pub async fn seed_samples(records: &dyn RecordStore) -> ImportResult<SeedReport> {
    let candidates = sample_students()?;
    seed_students(records, &candidates).await
}
