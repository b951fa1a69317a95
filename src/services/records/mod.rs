//! Upstream record source
//!
//! Jobs, trucks and drivers live in an external tabular store. The planner
//! only needs "all rows of a table", so the source is a narrow trait with an
//! Airtable implementation for production and an in-memory one for tests and
//! offline runs.

mod airtable;

pub use airtable::{AirtableClient, AirtableConfig};

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::types::Record;

/// Failure while reading a table
#[derive(Debug, thiserror::Error)]
pub enum RecordSourceError {
    /// Upstream answered with a non-success status
    #[error("Airtable {table} {status}")]
    Status { table: String, status: u16 },

    #[error("Airtable {table} request failed: {source}")]
    Transport {
        table: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Source of upstream table rows
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Read every row of `table`, following pagination to the end
    async fn list_all(&self, table: &str) -> Result<Vec<Record>, RecordSourceError>;

    /// Get source name for logging
    fn name(&self) -> &str;
}

/// Names of the three upstream tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub jobs: String,
    pub trucks: String,
    pub drivers: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            jobs: "2GoStorage Jobs".to_string(),
            trucks: "Trucks".to_string(),
            drivers: "Drivers".to_string(),
        }
    }
}

/// Fixed tables held in memory. Unknown tables read as empty.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    tables: HashMap<String, Vec<Record>>,
}

impl InMemorySource {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_table(mut self, table: impl Into<String>, records: Vec<Record>) -> Self {
        self.tables.insert(table.into(), records);
        self
    }

    /// Load tables from a JSON object of `{ "<table>": [records...] }`
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        let tables: HashMap<String, Vec<Record>> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse fixture {}", path.display()))?;
        Ok(Self { tables })
    }
}

#[async_trait]
impl RecordSource for InMemorySource {
    async fn list_all(&self, table: &str) -> Result<Vec<Record>, RecordSourceError> {
        Ok(self.tables.get(table).cloned().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "InMemory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[tokio::test]
    async fn test_in_memory_source_returns_rows() {
        let source = InMemorySource::new()
            .with_table("Trucks", vec![Record::new("rec1", json!({"Camion": "T-01"}))]);

        let rows = source.list_all("Trucks").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "rec1");
    }

    #[tokio::test]
    async fn test_in_memory_source_unknown_table_is_empty() {
        let source = InMemorySource::new();
        assert!(source.list_all("Drivers").await.unwrap().is_empty());
        assert_eq!(source.name(), "InMemory");
    }

    #[tokio::test]
    async fn test_in_memory_source_from_json_file() {
        let mut fixture = tempfile::NamedTempFile::new().unwrap();
        write!(fixture, r#"{{"Trucks": [{{"id": "rec1", "fields": {{"Status": "available"}}}}]}}"#).unwrap();

        let source = InMemorySource::from_json_file(fixture.path()).unwrap();

        let rows = source.list_all("Trucks").await.unwrap();
        assert_eq!(rows[0].text("Status").as_deref(), Some("available"));
    }

    #[test]
    fn test_in_memory_source_rejects_malformed_fixture() {
        let mut fixture = tempfile::NamedTempFile::new().unwrap();
        write!(fixture, "[not a table map]").unwrap();

        let error = InMemorySource::from_json_file(fixture.path()).unwrap_err();
        assert!(error.to_string().contains("Failed to parse fixture"));
    }

    #[test]
    fn test_status_error_message() {
        let error = RecordSourceError::Status { table: "Trucks".to_string(), status: 503 };
        assert_eq!(error.to_string(), "Airtable Trucks 503");
    }

    #[test]
    fn test_default_table_names() {
        let tables = TableNames::default();
        assert_eq!(tables.jobs, "2GoStorage Jobs");
        assert_eq!(tables.trucks, "Trucks");
        assert_eq!(tables.drivers, "Drivers");
    }
}
