use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use vrnt_core::{StudentId, StudentPatch, StudentRecord};
use vrnt_records::{MemoryStore, RecordResult, RecordStore};

/// Memory-backed store that counts every round trip.
#[derive(Default)]
pub struct InstrumentedStore {
    pub inner: MemoryStore,
    calls: AtomicUsize,
}

impl InstrumentedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordStore for InstrumentedStore {
    async fn find_by_uid(&self, needle: &str, limit: usize) -> RecordResult<Vec<StudentRecord>> {
        self.record_call();
        self.inner.find_by_uid(needle, limit).await
    }

    async fn get(&self, id: &StudentId) -> RecordResult<StudentRecord> {
        self.record_call();
        self.inner.get(id).await
    }

    async fn update(&self, id: &StudentId, patch: &StudentPatch) -> RecordResult<StudentRecord> {
        self.record_call();
        self.inner.update(id, patch).await
    }

    async fn insert(&self, record: &StudentPatch) -> RecordResult<StudentRecord> {
        self.record_call();
        self.inner.insert(record).await
    }

    async fn existing_uids(&self, uids: &[String]) -> RecordResult<HashSet<String>> {
        self.record_call();
        self.inner.existing_uids(uids).await
    }

    async fn health_check(&self) -> RecordResult<()> {
        self.record_call();
        self.inner.health_check().await
    }

    fn backend_name(&self) -> &'static str {
        "instrumented"
    }
}
