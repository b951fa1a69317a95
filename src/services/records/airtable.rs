//! Airtable REST client
//!
//! API documentation:
//! https://airtable.com/developers/web/api/list-records

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{RecordSource, RecordSourceError};
use crate::types::Record;

/// Largest page Airtable serves
const PAGE_SIZE: &str = "100";

/// Airtable client configuration
#[derive(Debug, Clone)]
pub struct AirtableConfig {
    /// API root (e.g., "https://api.airtable.com")
    pub api_url: String,
    pub base_id: String,
    /// Personal access token
    pub token: String,
    /// Request timeout; no timeout when unset
    pub timeout: Option<Duration>,
}

impl AirtableConfig {
    pub fn new(base_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_url: "https://api.airtable.com".to_string(),
            base_id: base_id.into(),
            token: token.into(),
            timeout: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListRecordsResponse {
    #[serde(default)]
    records: Vec<Record>,
    #[serde(default)]
    offset: Option<String>,
}

/// Airtable record source
pub struct AirtableClient {
    client: Client,
    config: AirtableConfig,
}

impl AirtableClient {
    pub fn new(config: AirtableConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent("route-suggester-worker/0.1");
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/v0/{}/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.base_id,
            urlencoding::encode(table)
        )
    }

    async fn fetch_page(
        &self,
        table: &str,
        offset: Option<&str>,
    ) -> Result<ListRecordsResponse, RecordSourceError> {
        let transport = |source| RecordSourceError::Transport {
            table: table.to_string(),
            source,
        };

        let mut query = vec![("pageSize", PAGE_SIZE)];
        if let Some(offset) = offset {
            query.push(("offset", offset));
        }

        let response = self.client
            .get(self.table_url(table))
            .bearer_auth(&self.config.token)
            .query(&query)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(RecordSourceError::Status {
                table: table.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.json().await.map_err(transport)
    }
}

#[async_trait]
impl RecordSource for AirtableClient {
    async fn list_all(&self, table: &str) -> Result<Vec<Record>, RecordSourceError> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        let mut pages = 0;

        loop {
            let page = self.fetch_page(table, offset.as_deref()).await?;
            pages += 1;
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        debug!("Read {} records of {} in {} pages", records.len(), table, pages);
        Ok(records)
    }

    fn name(&self) -> &str {
        "Airtable"
    }
}
