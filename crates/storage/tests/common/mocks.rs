use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use vrnt_storage::{BucketInfo, MemoryBackend, ObjectStore, PutOptions, StorageResult};

/// Memory backend that records writes and removals.
#[derive(Default)]
pub struct InstrumentedBackend {
    pub inner: MemoryBackend,
    puts: AtomicUsize,
    deleted: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl InstrumentedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for InstrumentedBackend {
    fn bucket(&self) -> &str {
        self.inner.bucket()
    }

    async fn put(&self, key: &str, data: Bytes, options: &PutOptions) -> StorageResult<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put(key, data, options).await
    }

    async fn get_public(&self, key: &str) -> StorageResult<Bytes> {
        self.inner.get_public(key).await
    }

    async fn delete(&self, keys: &[String]) -> StorageResult<()> {
        self.deleted.lock().unwrap().extend(keys.iter().cloned());
        self.inner.delete(keys).await
    }

    fn public_url(&self, key: &str) -> StorageResult<String> {
        self.inner.public_url(key)
    }

    async fn list_buckets(&self) -> StorageResult<Vec<BucketInfo>> {
        self.inner.list_buckets().await
    }

    fn backend_name(&self) -> &'static str {
        "instrumented"
    }
}
