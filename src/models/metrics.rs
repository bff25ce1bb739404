// Prometheus instant-query responses and per-component results

use serde::Deserialize;
use std::collections::BTreeMap;

/// Body of `GET /api/v1/query`.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub status: String,
    #[serde(default)]
    pub data: Option<QueryData>,
    #[serde(default, rename = "errorType")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryData {
    #[serde(default, rename = "resultType")]
    pub result_type: Option<String>,
    #[serde(default)]
    pub result: Vec<Sample>,
}

/// One vector sample: labels plus `[timestamp, "value"]`.
#[derive(Debug, Clone, Deserialize)]
pub struct Sample {
    #[serde(default)]
    pub metric: BTreeMap<String, String>,
    pub value: (serde_json::Value, String),
}

impl Sample {
    pub fn value(&self) -> &str {
        &self.value.1
    }
}

/// Component name → metric value, in first-seen key order.
///
/// Inserting an existing key replaces its value and keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentMetrics {
    entries: Vec<(String, String)>,
}

impl ComponentMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, component: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == component) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((component, value)),
        }
    }

    pub fn get(&self, component: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == component)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
