// Per-component memory/CPU report from in-cluster Prometheus

use crate::alias::{AliasMap, resolve};
use crate::cluster_exec::ClusterExec;
use crate::error::{ReportError, Result};
use crate::models::{ComponentMetrics, QueryResponse, Sample};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

pub const METRICS_REPORT_FILE: &str = "metrics.txt";

/// Component label as it appears on `kube_pod_labels` series.
pub const METRIC_LABEL_FOR_COMPONENT: &str = "label_app_kubernetes_io_component";

/// Key for rows without a component label.
pub const UNASSIGNED: &str = "unassigned";

/// Memory in MiB, summed per pod and joined to the pod's component label.
pub fn memory_query(namespace: &str) -> String {
    format!(
        "sum by ({METRIC_LABEL_FOR_COMPONENT}) (sum(container_memory_usage_bytes{{namespace=\"{namespace}\"}}) by (pod) \
         * on (pod) group_left({METRIC_LABEL_FOR_COMPONENT}) kube_pod_labels{{namespace=\"{namespace}\"}}) / (1024* 1024)"
    )
}

/// CPU cores, summed per pod and joined to the pod's component label.
pub fn cpu_query(namespace: &str) -> String {
    format!(
        "sum by ({METRIC_LABEL_FOR_COMPONENT}) (sum(pod:container_cpu_usage:sum{{namespace=\"{namespace}\"}}) by (pod) \
         * on (pod) group_left({METRIC_LABEL_FOR_COMPONENT}) kube_pod_labels{{namespace=\"{namespace}\"}})"
    )
}

/// Where the queries go and which namespace they cover.
#[derive(Debug, Clone)]
pub struct QueryTarget {
    pub url: String,
    pub namespace: String,
}

impl QueryTarget {
    /// The curl invocation run inside the Prometheus container.
    pub fn curl_command(&self, query: &str) -> Vec<String> {
        vec![
            "curl".to_string(),
            "--silent".to_string(),
            "--data-urlencode".to_string(),
            format!("query={query}"),
            self.url.clone(),
        ]
    }
}

/// Group rows by aliased component label. A repeated component keeps the last row's value.
pub fn convert_to_dict_per_component(rows: &[Sample], component_alias: &AliasMap) -> ComponentMetrics {
    let mut result = ComponentMetrics::new();
    for row in rows {
        let key = row
            .metric
            .get(METRIC_LABEL_FOR_COMPONENT)
            .map(String::as_str)
            .unwrap_or(UNASSIGNED);
        result.insert(resolve(key, component_alias).to_string(), row.value().to_string());
    }
    result
}

/// Decode a query body, failing unless Prometheus reports `success`.
pub fn parse_response(body: &[u8], component_alias: &AliasMap) -> Result<ComponentMetrics> {
    let response: QueryResponse = serde_json::from_slice(body)?;
    if response.status != "success" {
        return Err(ReportError::QueryNotSuccessful {
            status: response.status,
            response: String::from_utf8_lossy(body).trim().to_string(),
        });
    }
    let rows = response.data.map(|d| d.result).unwrap_or_default();
    debug!(rows = rows.len(), "query rows");
    Ok(convert_to_dict_per_component(&rows, component_alias))
}

/// Write one titled section: the title, `key : value` lines, then blank lines.
pub fn print_to_file<W: Write>(out: &mut W, title: &str, data: &ComponentMetrics) -> std::io::Result<()> {
    writeln!(out, "{title}")?;
    for (key, value) in data.iter() {
        writeln!(out, "{key} : {value}")?;
    }
    write!(out, "\n\n\n")
}

pub struct MetricsReporter<'a, E> {
    exec: E,
    target: QueryTarget,
    component_alias: &'a AliasMap,
    outdir: PathBuf,
}

impl<'a, E: ClusterExec> MetricsReporter<'a, E> {
    pub fn new(exec: E, target: QueryTarget, component_alias: &'a AliasMap, outdir: &Path) -> Self {
        Self {
            exec,
            target,
            component_alias,
            outdir: outdir.to_path_buf(),
        }
    }

    #[instrument(skip(self), fields(namespace = %self.target.namespace))]
    pub async fn run_prometheus_query(&self, query: &str) -> Result<ComponentMetrics> {
        let body = self.exec.exec(&self.target.curl_command(query)).await?;
        parse_response(&body, self.component_alias)
    }

    /// Query memory then CPU and write both sections to `metrics.txt`.
    ///
    /// The file is only created once both queries have succeeded.
    pub async fn generate(&self) -> Result<PathBuf> {
        let memory = self
            .run_prometheus_query(&memory_query(&self.target.namespace))
            .await?;
        let cpu = self
            .run_prometheus_query(&cpu_query(&self.target.namespace))
            .await?;

        std::fs::create_dir_all(&self.outdir)?;
        let path = self.outdir.join(METRICS_REPORT_FILE);
        let mut file = std::io::BufWriter::new(std::fs::File::create(&path)?);
        print_to_file(&mut file, "MEMORY CONSUMPTION", &memory)?;
        print_to_file(&mut file, "CPU CONSUMPTION", &cpu)?;
        file.flush()?;

        info!(
            path = %path.display(),
            memory_components = memory.len(),
            cpu_components = cpu.len(),
            "wrote metrics report"
        );
        Ok(path)
    }
}
