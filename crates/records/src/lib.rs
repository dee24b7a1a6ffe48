//! Record store client for VRNT student records.
//!
//! This crate provides:
//! - The `RecordStore` trait over the student table
//! - A PostgREST backend for the hosted store
//! - An in-process backend for dry runs and tests
//! - The `search_students` / `update_student` front doors used by callers

pub mod error;
pub mod memory;
pub mod postgrest;
pub mod store;

pub use error::{RecordError, RecordResult};
pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;
pub use store::RecordStore;

use std::sync::Arc;
use vrnt_core::config::StoreConfig;
use vrnt_core::{SEARCH_LIMIT, StudentId, StudentPatch, StudentRecord};

/// Create the hosted record store from configuration.
pub fn from_config(config: &StoreConfig) -> RecordResult<Arc<dyn RecordStore>> {
    let store = PostgrestStore::new(config)?;
    tracing::debug!(url = %config.url, table = %config.table, "record store configured");
    Ok(Arc::new(store))
}

/// Look students up by UID substring.
///
/// Blank queries return an empty list without contacting the store.
pub async fn search_students(
    store: &dyn RecordStore,
    query: &str,
) -> RecordResult<Vec<StudentRecord>> {
    let needle = query.trim();
    if needle.is_empty() {
        return Ok(Vec::new());
    }
    let rows = store.find_by_uid(needle, SEARCH_LIMIT).await?;
    tracing::debug!(query = %needle, matches = rows.len(), "student search");
    Ok(rows)
}

/// Apply a sparse patch to one student.
///
/// Empty patches are rejected before any round trip.
pub async fn update_student(
    store: &dyn RecordStore,
    id: &StudentId,
    patch: &StudentPatch,
) -> RecordResult<StudentRecord> {
    if patch.is_empty() {
        return Err(vrnt_core::Error::EmptyPatch.into());
    }
    let record = store.update(id, patch).await?;
    tracing::info!(id = %id, fields = patch.len(), "student updated");
    Ok(record)
}
