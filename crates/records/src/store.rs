//! Record store trait definition.

use crate::error::RecordResult;
use async_trait::async_trait;
use std::collections::HashSet;
use vrnt_core::{StudentId, StudentPatch, StudentRecord};

/// Access to the student table.
///
/// Every method is a single round trip to the store. Callers that need the
/// empty-query or empty-patch short circuits should go through
/// [`crate::search_students`] and [`crate::update_student`].
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Case-insensitive substring match on `uid`, ordered by name ascending,
    /// at most `limit` rows.
    async fn find_by_uid(&self, needle: &str, limit: usize) -> RecordResult<Vec<StudentRecord>>;

    /// Fetch one record by id.
    async fn get(&self, id: &StudentId) -> RecordResult<StudentRecord>;

    /// Apply a sparse patch and return the updated record.
    async fn update(&self, id: &StudentId, patch: &StudentPatch) -> RecordResult<StudentRecord>;

    /// Insert a new record and return it with its store-assigned id.
    async fn insert(&self, record: &StudentPatch) -> RecordResult<StudentRecord>;

    /// Which of `uids` already exist in the table.
    async fn existing_uids(&self, uids: &[String]) -> RecordResult<HashSet<String>>;

    /// Verify the store is reachable and the table readable.
    async fn health_check(&self) -> RecordResult<()>;

    /// Name of this backend, for logging.
    fn backend_name(&self) -> &'static str;
}
