//! HTTP client for the hosted backend's generic query/storage surface.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::debug;

use markload_model::{ImportProfile, Roster, RosterMember};

use crate::error::{Result, SubmitError};
use crate::sink::{Record, RecordSink};

/// User agent string for backend requests.
const USER_AGENT_VALUE: &str = concat!("markload/", env!("CARGO_PKG_VERSION"));

/// REST client speaking the backend's fixed contract: array upserts with a
/// natural-key conflict target, and roster reads per class scope.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client for the given base URL, attaching the API key as a
    /// bearer token when present.
    pub fn new(base_url: impl Into<String>, api_key: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        if let Some(api_key) = api_key {
            let value = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
                SubmitError::Config("api key contains invalid header characters".to_string())
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| SubmitError::Config(format!("failed to create HTTP client: {e}")))?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Insert-or-update a batch of records by natural key. One call, one
    /// outcome; the backend does not report per-row results.
    pub async fn upsert(
        &self,
        table: &str,
        natural_key: &[&str],
        records: &[Value],
    ) -> Result<()> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let on_conflict = natural_key.join(",");
        debug!(table, on_conflict = %on_conflict, records = records.len(), "upserting batch");

        let response = self
            .client
            .post(&url)
            .query(&[("on_conflict", on_conflict.as_str())])
            .header("Prefer", "resolution=merge-duplicates")
            .json(&records)
            .send()
            .await?;
        Self::ensure_success(response).await.map(drop)
    }

    /// Fetch the roster of students in a class scope.
    pub async fn fetch_roster(&self, class_id: &str) -> Result<Roster> {
        let url = format!("{}/rest/v1/classes/{}/students", self.base_url, class_id);
        debug!(class_id, "fetching roster");

        let response = self.client.get(&url).send().await?;
        let response = Self::ensure_success(response).await?;
        let members: Vec<RosterMember> = response
            .json()
            .await
            .map_err(|e| SubmitError::InvalidResponse(e.to_string()))?;
        Ok(Roster::new(members))
    }

    /// Sink bound to one profile's table, usable with `commit_in_chunks`.
    #[must_use]
    pub fn table_sink<'a>(&'a self, profile: &'a ImportProfile) -> TableSink<'a> {
        TableSink {
            client: self,
            profile,
        }
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(SubmitError::Backend {
            status: status.as_u16(),
            message,
        })
    }
}

/// `RecordSink` bound to one import profile's table and conflict target.
#[derive(Debug, Clone)]
pub struct TableSink<'a> {
    client: &'a BackendClient,
    profile: &'a ImportProfile,
}

#[async_trait]
impl RecordSink for TableSink<'_> {
    async fn upsert(&self, records: &[Record]) -> Result<()> {
        self.client
            .upsert(self.profile.table, self.profile.natural_key, records)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation_trims_trailing_slash() {
        let client = BackendClient::new("https://school.example.com/", Some("key"));
        assert!(client.is_ok());
    }

    #[test]
    fn bad_api_key_is_a_config_error() {
        let client = BackendClient::new("https://school.example.com", Some("bad\nkey"));
        assert!(matches!(client, Err(SubmitError::Config(_))));
    }
}
