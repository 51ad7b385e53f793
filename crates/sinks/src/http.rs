//! HTTP insert-all warehouse client
//!
//! Speaks the warehouse's JSON write API over HTTP:
//!
//! - `POST {base}/tables/{table}/insertAll` with `{"rows": [...]}` for
//!   batched writes; a 2xx response carries optional `insertErrors`.
//! - `POST {base}/tables/{table}/insert` with one JSON object for the
//!   error table.
//!
//! Authentication is a bearer token handed in at construction; acquiring
//! and refreshing it is the caller's problem.

use crate::{ErrorTable, InsertResponse, InsertRow, Warehouse, WarehouseError};
use hydrant_protocol::ErrorRecord;
use serde::Serialize;
use std::time::Duration;

/// Cap on error-body text kept in a `Status` error
const MAX_BODY_LEN: usize = 512;

/// Connection settings for the HTTP warehouse clients
#[derive(Debug, Clone)]
pub struct HttpWarehouseConfig {
    /// Base URL of the write API
    pub base_url: String,

    /// Bearer token, if the deployment requires one
    pub auth_token: Option<String>,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for HttpWarehouseConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8980".into(),
            auth_token: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl HttpWarehouseConfig {
    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the bearer token
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn table_url(&self, table: &str, operation: &str) -> String {
        format!(
            "{}/tables/{}/{}",
            self.base_url.trim_end_matches('/'),
            table,
            operation
        )
    }

    fn build_client(&self) -> Result<reqwest::Client, WarehouseError> {
        let client = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()?;
        Ok(client)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertAllRequest {
    rows: Vec<InsertRow>,
}

/// Batched insert-all client
pub struct HttpWarehouse {
    client: reqwest::Client,
    config: HttpWarehouseConfig,
}

impl HttpWarehouse {
    /// Build a client from connection settings
    pub fn new(config: HttpWarehouseConfig) -> Result<Self, WarehouseError> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }
}

impl Warehouse for HttpWarehouse {
    async fn insert_all(
        &self,
        table: &str,
        rows: Vec<InsertRow>,
    ) -> Result<InsertResponse, WarehouseError> {
        let url = self.config.table_url(table, "insertAll");
        tracing::debug!(table, rows = rows.len(), "submitting insert-all request");

        let mut request = self.client.post(&url).json(&InsertAllRequest { rows });
        if let Some(ref token) = self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WarehouseError::Status {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        response
            .json::<InsertResponse>()
            .await
            .map_err(|e| WarehouseError::InvalidResponse(e.to_string()))
    }
}

/// Single-row error table client
pub struct HttpErrorTable {
    client: reqwest::Client,
    config: HttpWarehouseConfig,
    table: String,
}

impl HttpErrorTable {
    /// Build a client writing to `table`
    pub fn new(config: HttpWarehouseConfig, table: impl Into<String>) -> Result<Self, WarehouseError> {
        let client = config.build_client()?;
        Ok(Self {
            client,
            config,
            table: table.into(),
        })
    }
}

impl ErrorTable for HttpErrorTable {
    async fn write(&self, record: &ErrorRecord) -> Result<(), WarehouseError> {
        let url = self.config.table_url(&self.table, "insert");
        tracing::debug!(table = %self.table, kind = %record.kind, "writing error record");

        let mut request = self.client.post(&url).json(record);
        if let Some(ref token) = self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WarehouseError::Status {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        Ok(())
    }
}

fn truncate_body(mut body: String) -> String {
    if body.len() > MAX_BODY_LEN {
        let mut cut = MAX_BODY_LEN;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push_str("...");
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_joins_cleanly() {
        let config = HttpWarehouseConfig::default().with_base_url("https://wh.example.com/");
        assert_eq!(
            config.table_url("sample_posts", "insertAll"),
            "https://wh.example.com/tables/sample_posts/insertAll"
        );
    }

    #[test]
    fn test_truncate_body_caps_length() {
        let long = "x".repeat(2000);
        let truncated = truncate_body(long);
        assert_eq!(truncated.len(), MAX_BODY_LEN + 3);
        assert!(truncated.ends_with("..."));

        assert_eq!(truncate_body("short".into()), "short");
    }

    #[test]
    fn test_config_builders() {
        let config = HttpWarehouseConfig::default()
            .with_base_url("http://wh:1234")
            .with_auth_token("secret")
            .with_request_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "http://wh:1234");
        assert_eq!(config.auth_token.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }
}
