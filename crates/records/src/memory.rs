//! In-process record store.
//!
//! Backs `--dry-run` imports and tests. Mirrors the hosted store's query
//! semantics: substring match on `uid`, name ascending with missing names
//! last, store-assigned ids and timestamps.

use crate::error::{RecordError, RecordResult};
use crate::store::RecordStore;
use async_trait::async_trait;
use std::collections::HashSet;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::RwLock;
use uuid::Uuid;
use vrnt_core::{StudentId, StudentPatch, StudentRecord};

#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<StudentRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all rows in insertion order.
    pub async fn rows(&self) -> Vec<StudentRecord> {
        self.rows.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_by_uid(&self, needle: &str, limit: usize) -> RecordResult<Vec<StudentRecord>> {
        let needle = needle.to_lowercase();
        let rows = self.rows.read().await;
        let mut matches: Vec<StudentRecord> = rows
            .iter()
            .filter(|row| {
                row.uid
                    .as_deref()
                    .is_some_and(|uid| uid.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        // NULLs sort last, as in Postgres ascending order.
        matches.sort_by(|a, b| match (&a.name_aadhar, &b.name_aadhar) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        matches.truncate(limit);
        Ok(matches)
    }

    async fn get(&self, id: &StudentId) -> RecordResult<StudentRecord> {
        self.rows
            .read()
            .await
            .iter()
            .find(|row| &row.id == id)
            .cloned()
            .ok_or_else(|| RecordError::NotFound(format!("student {id}")))
    }

    async fn update(&self, id: &StudentId, patch: &StudentPatch) -> RecordResult<StudentRecord> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| &row.id == id)
            .ok_or_else(|| RecordError::NotFound(format!("student {id}")))?;
        row.apply(patch);
        row.updated_at = Some(now_rfc3339());
        Ok(row.clone())
    }

    async fn insert(&self, record: &StudentPatch) -> RecordResult<StudentRecord> {
        let id = StudentId::new(Uuid::new_v4().to_string())?;
        let mut row = StudentRecord::from_patch(id, record);
        let now = now_rfc3339();
        row.created_at = Some(now.clone());
        row.updated_at = Some(now);
        self.rows.write().await.push(row.clone());
        Ok(row)
    }

    async fn existing_uids(&self, uids: &[String]) -> RecordResult<HashSet<String>> {
        let wanted: HashSet<&str> = uids.iter().map(String::as_str).collect();
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter_map(|row| row.uid.as_deref())
            .filter(|uid| wanted.contains(uid))
            .map(str::to_string)
            .collect())
    }

    async fn health_check(&self) -> RecordResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
