//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Top-level configuration for the CLI and batch drivers.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Hosted record/object store.
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Validate all sections.
    pub fn validate(&self) -> Result<(), String> {
        self.store.validate()
    }
}

/// Connection settings for the hosted record and object store.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Project endpoint (e.g., "https://abcd.supabase.co").
    #[serde(default)]
    pub url: String,
    /// API key sent as `apikey` and bearer token.
    /// WARNING: Prefer VRNT_STORE__KEY or SUPABASE_SERVICE_ROLE_KEY over storing in config.
    #[serde(default)]
    pub key: String,
    /// Student table name.
    #[serde(default = "default_table")]
    pub table: String,
    /// Document bucket name.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_table() -> String {
    crate::DEFAULT_TABLE.to_string()
}

fn default_bucket() -> String {
    crate::DEFAULT_BUCKET.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            key: String::new(),
            table: default_table(),
            bucket: default_bucket(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .field("table", &self.table)
            .field("bucket", &self.bucket)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl StoreConfig {
    /// Build a config pointing at `url` with default table and bucket.
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
            ..Self::default()
        }
    }

    /// Absolute URL for a path below the project endpoint.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate store configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(
                "store endpoint is not set (VRNT_STORE__URL or SUPABASE_URL)".to_string(),
            );
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(format!("store endpoint must be an http(s) URL: {url}"));
        }
        if self.key.trim().is_empty() {
            return Err(
                "store key is not set (VRNT_STORE__KEY or SUPABASE_SERVICE_ROLE_KEY)".to_string(),
            );
        }
        if self.table.trim().is_empty() {
            return Err("store table must not be empty".to_string());
        }
        if self.bucket.trim().is_empty() || self.bucket.contains('/') {
            return Err(format!("invalid bucket name: {:?}", self.bucket));
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }
}
