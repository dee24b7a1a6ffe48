//! In-process object store for dry runs and tests.

use crate::error::{StorageError, StorageResult};
use crate::traits::{BucketInfo, ObjectStore, PutOptions};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Clone, Debug)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
}

/// Bucket kept in memory; public URLs use the `memory://{bucket}/` scheme.
pub struct MemoryBackend {
    bucket: String,
    objects: RwLock<BTreeMap<String, StoredObject>>,
}

impl MemoryBackend {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    /// Stored keys in lexical order.
    pub async fn keys(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }

    pub async fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(vrnt_core::DEFAULT_BUCKET)
    }
}

#[async_trait]
impl ObjectStore for MemoryBackend {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put(&self, key: &str, data: Bytes, options: &PutOptions) -> StorageResult<()> {
        let mut objects = self.objects.write().await;
        if !options.upsert && objects.contains_key(key) {
            return Err(StorageError::Api {
                status: 409,
                body: format!("The resource already exists: {key}"),
            });
        }
        objects.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: options.content_type.clone(),
            },
        );
        Ok(())
    }

    async fn get_public(&self, key: &str) -> StorageResult<Bytes> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|object| object.data.clone())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, keys: &[String]) -> StorageResult<()> {
        let mut objects = self.objects.write().await;
        for key in keys {
            objects.remove(key);
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> StorageResult<String> {
        if key.is_empty() {
            return Err(StorageError::PublicUrl("empty key".to_string()));
        }
        Ok(format!("memory://{}/{}", self.bucket, key))
    }

    async fn list_buckets(&self) -> StorageResult<Vec<BucketInfo>> {
        Ok(vec![BucketInfo {
            id: self.bucket.clone(),
            name: self.bucket.clone(),
            public: true,
        }])
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
