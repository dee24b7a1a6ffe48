//! Document storage for VRNT student records.
//!
//! This crate provides:
//! - The `ObjectStore` abstraction over a single bucket
//! - Backends: Supabase Storage and in-process memory
//! - Validated document upload and removal by key or public URL
//! - A storage self-check

pub mod backends;
pub mod check;
pub mod documents;
pub mod error;
pub mod traits;

pub use backends::{memory::MemoryBackend, supabase::SupabaseStorage};
pub use check::{StorageCheckReport, run_storage_check};
pub use documents::{UploadedDocument, delete_document, object_key, upload_document};
pub use error::{StorageError, StorageResult};
pub use traits::{BucketInfo, ObjectStore, PutOptions};

use std::sync::Arc;
use vrnt_core::config::StoreConfig;

/// Create the hosted object store from configuration.
pub fn from_config(config: &StoreConfig) -> StorageResult<Arc<dyn ObjectStore>> {
    let backend = SupabaseStorage::new(config)?;
    tracing::debug!(url = %config.url, bucket = %config.bucket, "object store configured");
    Ok(Arc::new(backend))
}
