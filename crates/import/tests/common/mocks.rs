use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use vrnt_core::{StudentId, StudentPatch, StudentRecord};
use vrnt_records::{MemoryStore, RecordError, RecordResult, RecordStore};

/// Memory store that rejects selected inserts and, optionally, every update.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    reject_uids: HashSet<String>,
    reject_updates: bool,
    inserts: AtomicUsize,
    updates: AtomicUsize,
}

#[allow(dead_code)]
impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(uids: &[&str]) -> Self {
        Self {
            reject_uids: uids.iter().map(|u| u.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn rejecting_updates() -> Self {
        Self {
            reject_updates: true,
            ..Self::default()
        }
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

fn refused(body: &str) -> RecordError {
    RecordError::Api {
        status: 400,
        body: body.to_string(),
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn find_by_uid(&self, needle: &str, limit: usize) -> RecordResult<Vec<StudentRecord>> {
        self.inner.find_by_uid(needle, limit).await
    }

    async fn get(&self, id: &StudentId) -> RecordResult<StudentRecord> {
        self.inner.get(id).await
    }

    async fn update(&self, id: &StudentId, patch: &StudentPatch) -> RecordResult<StudentRecord> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.reject_updates {
            return Err(refused("update refused"));
        }
        self.inner.update(id, patch).await
    }

    async fn insert(&self, record: &StudentPatch) -> RecordResult<StudentRecord> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        if let Some(uid) = &record.uid {
            if self.reject_uids.contains(uid) {
                return Err(refused("new row violates check constraint"));
            }
        }
        self.inner.insert(record).await
    }

    async fn existing_uids(&self, uids: &[String]) -> RecordResult<HashSet<String>> {
        self.inner.existing_uids(uids).await
    }

    async fn health_check(&self) -> RecordResult<()> {
        self.inner.health_check().await
    }

    fn backend_name(&self) -> &'static str {
        "flaky"
    }
}
