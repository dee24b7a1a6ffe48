//! PostgREST-backed record store (Supabase REST API).

use crate::error::{RecordError, RecordResult};
use crate::store::RecordStore;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::instrument;
use vrnt_core::config::StoreConfig;
use vrnt_core::{StudentId, StudentPatch, StudentRecord};

/// Record store talking to `{endpoint}/rest/v1/{table}`.
#[derive(Clone)]
pub struct PostgrestStore {
    http: reqwest::Client,
    table_url: Url,
    key: String,
}

#[derive(Deserialize)]
struct UidRow {
    uid: Option<String>,
}

impl PostgrestStore {
    /// Create a store from configuration.
    pub fn new(config: &StoreConfig) -> RecordResult<Self> {
        config.validate().map_err(RecordError::Config)?;

        let table_url = Url::parse(&config.endpoint_url(&format!("rest/v1/{}", config.table)))
            .map_err(|e| RecordError::Config(format!("invalid store URL: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            table_url,
            key: config.key.clone(),
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    fn url_with(&self, pairs: &[(&str, &str)]) -> Url {
        let mut url = self.table_url.clone();
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key, value);
            }
        }
        url
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> RecordResult<T> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RecordError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a request that returns a representation array and take its first row.
    async fn send_single(&self, req: RequestBuilder, what: &str) -> RecordResult<StudentRecord> {
        let rows: Vec<StudentRecord> = self.send_json(req).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RecordError::NotFound(what.to_string()))
    }
}

/// Quote a value for a PostgREST `in.(...)` list.
fn quote_list_item(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[async_trait]
impl RecordStore for PostgrestStore {
    #[instrument(skip(self), fields(backend = "postgrest"))]
    async fn find_by_uid(&self, needle: &str, limit: usize) -> RecordResult<Vec<StudentRecord>> {
        let pattern = format!("ilike.%{needle}%");
        let limit = limit.to_string();
        let url = self.url_with(&[
            ("select", "*"),
            ("uid", &pattern),
            ("order", "name_aadhar.asc"),
            ("limit", &limit),
        ]);
        self.send_json(self.request(Method::GET, url)).await
    }

    #[instrument(skip(self), fields(backend = "postgrest"))]
    async fn get(&self, id: &StudentId) -> RecordResult<StudentRecord> {
        let filter = format!("eq.{id}");
        let url = self.url_with(&[("select", "*"), ("id", &filter)]);
        self.send_single(self.request(Method::GET, url), &format!("student {id}"))
            .await
    }

    #[instrument(skip(self, patch), fields(backend = "postgrest", field_count = patch.len()))]
    async fn update(&self, id: &StudentId, patch: &StudentPatch) -> RecordResult<StudentRecord> {
        let filter = format!("eq.{id}");
        let url = self.url_with(&[("id", &filter), ("select", "*")]);
        let req = self
            .request(Method::PATCH, url)
            .header("Prefer", "return=representation")
            .json(&patch.to_json());
        self.send_single(req, &format!("student {id}")).await
    }

    #[instrument(skip(self, record), fields(backend = "postgrest", uid = ?record.uid))]
    async fn insert(&self, record: &StudentPatch) -> RecordResult<StudentRecord> {
        let url = self.url_with(&[("select", "*")]);
        let req = self
            .request(Method::POST, url)
            .header("Prefer", "return=representation")
            .json(record);
        self.send_single(req, "inserted student").await
    }

    #[instrument(skip(self, uids), fields(backend = "postgrest", candidates = uids.len()))]
    async fn existing_uids(&self, uids: &[String]) -> RecordResult<HashSet<String>> {
        if uids.is_empty() {
            return Ok(HashSet::new());
        }
        let list = uids
            .iter()
            .map(|uid| quote_list_item(uid))
            .collect::<Vec<_>>()
            .join(",");
        let filter = format!("in.({list})");
        let url = self.url_with(&[("select", "uid"), ("uid", &filter)]);
        let rows: Vec<UidRow> = self.send_json(self.request(Method::GET, url)).await?;
        Ok(rows.into_iter().filter_map(|row| row.uid).collect())
    }

    #[instrument(skip(self), fields(backend = "postgrest"))]
    async fn health_check(&self) -> RecordResult<()> {
        let url = self.url_with(&[("select", "id"), ("limit", "1")]);
        let _: Vec<serde_json::Value> = self.send_json(self.request(Method::GET, url)).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgrest"
    }
}
