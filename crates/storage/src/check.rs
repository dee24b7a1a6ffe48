//! Storage self-check: bucket presence, write, public read, removal.

use crate::traits::{ObjectStore, PutOptions};
use bytes::Bytes;
use serde::Serialize;
use time::OffsetDateTime;

const PROBE_BODY: &[u8] = b"test content";

/// Outcome of each self-check step.
#[derive(Clone, Debug, Default, Serialize)]
pub struct StorageCheckReport {
    pub bucket_exists: bool,
    pub can_upload: bool,
    pub can_read: bool,
    pub cleaned_up: bool,
    pub errors: Vec<String>,
}

impl StorageCheckReport {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Run every step, recording failures instead of stopping at the first one.
pub async fn run_storage_check(store: &dyn ObjectStore) -> StorageCheckReport {
    let mut report = StorageCheckReport::default();
    let bucket = store.bucket().to_string();

    match store.list_buckets().await {
        Ok(buckets) => {
            if buckets.iter().any(|b| b.name == bucket) {
                report.bucket_exists = true;
            } else {
                let available: Vec<_> = buckets.iter().map(|b| b.name.as_str()).collect();
                report.errors.push(format!(
                    "bucket \"{bucket}\" does not exist (available: {})",
                    available.join(", ")
                ));
            }
        }
        Err(e) => report.errors.push(format!("bucket list error: {e}")),
    }

    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let key = format!("test/{millis}_test.txt");
    let options = PutOptions {
        content_type: "text/plain".to_string(),
        cache_control: None,
        upsert: true,
    };
    if let Err(e) = store.put(&key, Bytes::from_static(PROBE_BODY), &options).await {
        report.errors.push(format!("upload error: {e}"));
        return report;
    }
    report.can_upload = true;
    tracing::debug!(key = %key, "probe object written");

    match store.get_public(&key).await {
        Ok(body) if body.as_ref() == PROBE_BODY => report.can_read = true,
        Ok(_) => report
            .errors
            .push("public read returned unexpected content".to_string()),
        Err(e) => report.errors.push(format!("public read error: {e}")),
    }

    match store.delete(std::slice::from_ref(&key)).await {
        Ok(()) => report.cleaned_up = true,
        Err(e) => report.errors.push(format!("cleanup error: {e}")),
    }

    report
}
