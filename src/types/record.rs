//! Raw upstream records
//!
//! Rows of the external tabular store arrive as loosely typed field maps.
//! Accessors here never fail: a missing field or a field of an unexpected
//! type simply reads as absent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of an upstream table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    #[cfg(test)]
    pub fn new(id: impl Into<String>, fields: Value) -> Self {
        let fields = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self { id: id.into(), fields }
    }

    /// Text value of a field. Numbers are rendered, lists of texts are joined.
    pub fn text(&self, field: &str) -> Option<String> {
        match self.fields.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Array(items) => {
                let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(", "))
                }
            }
            _ => None,
        }
    }

    /// Text value of a field, or an empty string
    pub fn text_or_empty(&self, field: &str) -> String {
        self.text(field).unwrap_or_default()
    }

    /// Numeric value of a field; numeric strings are accepted
    pub fn number(&self, field: &str) -> Option<f64> {
        match self.fields.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Linked-record references of a field.
    ///
    /// Links come either as plain ids or as objects carrying a `name`
    /// (falling back to `id`).
    pub fn links(&self, field: &str) -> Vec<String> {
        let Some(Value::Array(items)) = self.fields.get(field) else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(obj) => obj
                    .get("name")
                    .or_else(|| obj.get("id"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            })
            .collect()
    }

    /// First non-empty text among `fields`, falling back to the record id
    pub fn display_id(&self, fields: &[&str]) -> String {
        fields
            .iter()
            .filter_map(|f| self.text(f))
            .find(|s| !s.is_empty())
            .unwrap_or_else(|| self.id.clone())
    }
}
