// Cluster objects as listed by `kubectl get ... -o json|yaml`

use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Well-known label naming the logical component an object belongs to.
pub const COMPONENT_LABEL: &str = "app.kubernetes.io/component";
/// Well-known label naming the controller that created an object.
pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";

static NO_LABELS: BTreeMap<String, String> = BTreeMap::new();

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default)]
    pub labels: Option<BTreeMap<String, String>>,
}

/// Read-only view of a listed object: only the fields the graphs need.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClusterObject {
    pub kind: String,
    pub metadata: ObjectMeta,
}

impl ClusterObject {
    pub fn new(kind: &str, name: &str) -> Self {
        Self {
            kind: kind.to_string(),
            metadata: ObjectMeta {
                name: name.to_string(),
                labels: None,
            },
        }
    }

    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.metadata
            .labels
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    /// `kind/name`, before aliasing.
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.kind, self.metadata.name)
    }

    /// The object's labels; empty when the object carries none.
    pub fn labels(&self) -> &BTreeMap<String, String> {
        self.metadata.labels.as_ref().unwrap_or(&NO_LABELS)
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels().get(key).map(String::as_str)
    }
}

/// Inventory listings come either as a `List` document or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing {
    List { items: Vec<serde_json::Value> },
    Bare(Vec<serde_json::Value>),
}

impl Listing {
    fn into_items(self) -> Vec<serde_json::Value> {
        match self {
            Listing::List { items } | Listing::Bare(items) => items,
        }
    }
}

/// Parse an inventory listing (JSON or YAML) into cluster objects, in listing order.
///
/// Each item is validated on its own so a malformed entry is reported by index.
pub fn parse_objects(input: &str) -> anyhow::Result<Vec<ClusterObject>> {
    let trimmed = input.trim_start();
    let listing: Listing = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        serde_json::from_str(input).context("object listing is not a JSON list")?
    } else {
        serde_yaml::from_str(input).context("object listing is not a YAML list")?
    };

    listing
        .into_items()
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<ClusterObject>(item)
                .with_context(|| format!("object #{i} needs `kind` and `metadata.name`"))
        })
        .collect()
}
