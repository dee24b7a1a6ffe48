//! Upload and removal of student documents.

use crate::error::{StorageError, StorageResult};
use crate::traits::{ObjectStore, PutOptions};
use bytes::Bytes;
use vrnt_core::{DocumentKind, DocumentPath, StudentId, UploadPolicy};

/// A document written to the bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedDocument {
    /// Object key inside the bucket.
    pub path: String,
    /// Public URL to store on the student record.
    pub public_url: String,
}

/// Validate and store one document for `owner`.
///
/// Size and MIME type are checked against `policy` before anything is sent.
/// Each call writes under a freshly generated path, so a retried upload never
/// overwrites an earlier one.
pub async fn upload_document(
    store: &dyn ObjectStore,
    policy: &UploadPolicy,
    owner: &StudentId,
    data: Bytes,
    kind: DocumentKind,
    mime: &str,
    declared_size: u64,
) -> StorageResult<UploadedDocument> {
    let size = declared_size.max(data.len() as u64);
    let extension = policy.validate(kind, mime, size)?;

    let path = DocumentPath::generate(owner, kind, extension).to_string();
    tracing::debug!(path = %path, size, mime, "uploading document");

    let options = PutOptions::document(mime.trim().to_ascii_lowercase());
    store.put(&path, data, &options).await?;

    let public_url = store.public_url(&path)?;
    tracing::info!(owner = %owner, kind = %kind, path = %path, "document uploaded");
    Ok(UploadedDocument { path, public_url })
}

/// Recover the object key from either a bare key or a public URL.
///
/// Everything up to and including the first `{bucket}/` marker is dropped.
pub fn object_key(path_or_url: &str, bucket: &str) -> StorageResult<String> {
    let input = path_or_url.trim();
    let marker = format!("{bucket}/");
    let key = match input.find(&marker) {
        Some(idx) => &input[idx + marker.len()..],
        None => input,
    };
    let key = key.trim_start_matches('/');
    if key.is_empty() {
        return Err(StorageError::InvalidPath(format!(
            "no object key in {path_or_url:?}"
        )));
    }
    Ok(key.to_string())
}

/// Remove one document by key or public URL. Returns the key that was removed.
pub async fn delete_document(store: &dyn ObjectStore, path_or_url: &str) -> StorageResult<String> {
    let key = object_key(path_or_url, store.bucket())?;
    store.delete(std::slice::from_ref(&key)).await?;
    tracing::info!(key = %key, "document removed");
    Ok(key)
}
