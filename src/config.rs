use crate::alias::AliasMap;
use crate::cluster_exec::CliExec;
use crate::metrics::QueryTarget;
use crate::render::RenderFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "labelviz.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Node-name aliases, keyed by `kind/name`.
    #[serde(default)]
    pub alias: AliasMap,
    /// Component-name aliases, keyed by the component label value.
    #[serde(default)]
    pub component_alias: AliasMap,
    #[serde(default)]
    pub prometheus: PrometheusConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrometheusConfig {
    /// Cluster CLI used for `exec` (`oc` or `kubectl`).
    pub cli: String,
    pub namespace: String,
    pub pod: String,
    pub container: String,
    /// Query endpoint as seen from inside the container.
    pub url: String,
    /// Namespace the memory/CPU queries are scoped to.
    pub target_namespace: String,
}

impl Default for PrometheusConfig {
    fn default() -> Self {
        Self {
            cli: "oc".into(),
            namespace: "openshift-monitoring".into(),
            pod: "prometheus-k8s-0".into(),
            container: "prometheus".into(),
            url: "http://127.0.0.1:9090/api/v1/query".into(),
            target_namespace: "openshift-cnv".into(),
        }
    }
}

impl PrometheusConfig {
    pub fn cluster_exec(&self) -> CliExec {
        CliExec {
            cli: self.cli.clone(),
            namespace: self.namespace.clone(),
            pod: self.pod.clone(),
            container: self.container.clone(),
        }
    }

    pub fn query_target(&self) -> QueryTarget {
        QueryTarget {
            url: self.url.clone(),
            namespace: self.target_namespace.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    #[serde(default)]
    pub format: RenderFormat,
}

impl AppConfig {
    /// Resolve the config path: explicit flag, then `CONFIG_FILE`, then `labelviz.toml`.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("CONFIG_FILE").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read config {}: {}", path.display(), e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let p = &self.prometheus;
        for (field, value) in [
            ("cli", &p.cli),
            ("namespace", &p.namespace),
            ("pod", &p.pod),
            ("container", &p.container),
            ("target_namespace", &p.target_namespace),
        ] {
            anyhow::ensure!(!value.trim().is_empty(), "prometheus.{field} must be non-empty");
        }
        anyhow::ensure!(
            p.url.starts_with("http://") || p.url.starts_with("https://"),
            "prometheus.url must be an http(s) URL, got {:?}",
            p.url
        );
        anyhow::ensure!(
            !self.alias.contains_key(""),
            "alias keys must be non-empty"
        );
        anyhow::ensure!(
            !self.component_alias.contains_key(""),
            "component_alias keys must be non-empty"
        );
        Ok(())
    }
}
