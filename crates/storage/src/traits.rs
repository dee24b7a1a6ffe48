//! Storage trait definitions.

use crate::error::StorageResult;
use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

/// Write options for a single object.
#[derive(Clone, Debug)]
pub struct PutOptions {
    /// MIME type stored with the object.
    pub content_type: String,
    /// Cache-Control value served with the public object.
    pub cache_control: Option<String>,
    /// Overwrite an existing object at the same key.
    pub upsert: bool,
}

impl PutOptions {
    /// Options used for student documents: one hour cache, overwrite on conflict.
    pub fn document(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            cache_control: Some("max-age=3600".to_string()),
            upsert: true,
        }
    }
}

/// Bucket metadata as reported by the store.
#[derive(Clone, Debug, Deserialize)]
pub struct BucketInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub public: bool,
}

/// Object store abstraction over a single bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Bucket this store writes into.
    fn bucket(&self) -> &str;

    /// Put an object.
    async fn put(&self, key: &str, data: Bytes, options: &PutOptions) -> StorageResult<()>;

    /// Fetch an object through its public URL.
    async fn get_public(&self, key: &str) -> StorageResult<Bytes>;

    /// Remove objects. Missing keys are the store's concern.
    async fn delete(&self, keys: &[String]) -> StorageResult<()>;

    /// Public, unauthenticated URL for `key`.
    fn public_url(&self, key: &str) -> StorageResult<String>;

    /// List the buckets visible with the configured key.
    async fn list_buckets(&self) -> StorageResult<Vec<BucketInfo>>;

    /// Get the name of this storage backend.
    ///
    /// Used for logging.
    fn backend_name(&self) -> &'static str;
}
