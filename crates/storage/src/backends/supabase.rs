//! Supabase Storage backend over its REST API.

use crate::error::{StorageError, StorageResult};
use crate::traits::{BucketInfo, ObjectStore, PutOptions};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde_json::json;
use tracing::instrument;
use vrnt_core::config::StoreConfig;

/// Object store talking to `{endpoint}/storage/v1`.
#[derive(Clone)]
pub struct SupabaseStorage {
    http: reqwest::Client,
    base: String,
    bucket: String,
    key: String,
}

impl SupabaseStorage {
    /// Create a backend from configuration.
    pub fn new(config: &StoreConfig) -> StorageResult<Self> {
        config.validate().map_err(StorageError::Config)?;

        let base = config.endpoint_url("storage/v1");
        Url::parse(&base).map_err(|e| StorageError::Config(format!("invalid store URL: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base,
            bucket: config.bucket.clone(),
            key: config.key.clone(),
        })
    }

    fn url(&self, path: &str) -> StorageResult<Url> {
        Url::parse(&format!("{}/{}", self.base, path))
            .map_err(|e| StorageError::InvalidPath(format!("{path}: {e}")))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    async fn check(response: Response) -> StorageResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await?;
        Err(StorageError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

/// Reject keys that would escape the bucket or address it ambiguously.
fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.starts_with('/') || key.split('/').any(|s| s.is_empty() || s == "..") {
        return Err(StorageError::InvalidPath(format!("invalid object key: {key:?}")));
    }
    Ok(())
}

#[async_trait]
impl ObjectStore for SupabaseStorage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    #[instrument(skip(self, data, options), fields(backend = "supabase", size = data.len()))]
    async fn put(&self, key: &str, data: Bytes, options: &PutOptions) -> StorageResult<()> {
        validate_key(key)?;
        let url = self.url(&format!("object/{}/{}", self.bucket, key))?;
        let mut req = self
            .request(Method::POST, url)
            .header("content-type", &options.content_type)
            .header("x-upsert", if options.upsert { "true" } else { "false" })
            .body(data);
        if let Some(cache_control) = &options.cache_control {
            req = req.header("cache-control", cache_control);
        }
        Self::check(req.send().await?).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(backend = "supabase"))]
    async fn get_public(&self, key: &str) -> StorageResult<Bytes> {
        let url = Url::parse(&self.public_url(key)?)
            .map_err(|e| StorageError::PublicUrl(e.to_string()))?;
        let response = self.http.get(url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(key.to_string()));
        }
        let response = Self::check(response).await?;
        Ok(response.bytes().await?)
    }

    #[instrument(skip(self), fields(backend = "supabase"))]
    async fn delete(&self, keys: &[String]) -> StorageResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let url = self.url(&format!("object/{}", self.bucket))?;
        let req = self
            .request(Method::DELETE, url)
            .json(&json!({ "prefixes": keys }));
        Self::check(req.send().await?).await?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> StorageResult<String> {
        validate_key(key).map_err(|e| StorageError::PublicUrl(e.to_string()))?;
        let url = Url::parse(&format!("{}/object/public/{}/{}", self.base, self.bucket, key))
            .map_err(|e| StorageError::PublicUrl(e.to_string()))?;
        Ok(url.to_string())
    }

    #[instrument(skip(self), fields(backend = "supabase"))]
    async fn list_buckets(&self) -> StorageResult<Vec<BucketInfo>> {
        let url = self.url("bucket")?;
        let response = Self::check(self.request(Method::GET, url).send().await?).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn backend_name(&self) -> &'static str {
        "supabase"
    }
}
