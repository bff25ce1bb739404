// Metrics report pipeline against canned Prometheus responses

use labelviz::alias::AliasMap;
use labelviz::cluster_exec::ClusterExec;
use labelviz::error::{ReportError, Result};
use labelviz::metrics::{METRICS_REPORT_FILE, MetricsReporter, QueryTarget, parse_response};
use std::cell::RefCell;
use std::collections::VecDeque;

const MEMORY_BODY: &str = r#"{"status":"success","data":{"resultType":"vector","result":[
  {"metric":{"label_app_kubernetes_io_component":"cdi"},"value":[1700000000.1,"12.5"]},
  {"metric":{"label_app_kubernetes_io_component":"compute"},"value":[1700000000.1,"410.25"]},
  {"metric":{},"value":[1700000000.1,"3"]}
]}}"#;

const CPU_BODY: &str = r#"{"status":"success","data":{"resultType":"vector","result":[
  {"metric":{"label_app_kubernetes_io_component":"compute"},"value":[1700000000.2,"0.31"]}
]}}"#;

/// Replays queued responses and records the commands it was given.
struct CannedExec {
    responses: RefCell<VecDeque<Result<Vec<u8>>>>,
    commands: RefCell<Vec<Vec<String>>>,
}

impl CannedExec {
    fn new(responses: Vec<Result<Vec<u8>>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            commands: RefCell::new(Vec::new()),
        }
    }
}

impl ClusterExec for &CannedExec {
    async fn exec(&self, command: &[String]) -> Result<Vec<u8>> {
        self.commands.borrow_mut().push(command.to_vec());
        self.responses
            .borrow_mut()
            .pop_front()
            .expect("unexpected extra query")
    }
}

fn target() -> QueryTarget {
    QueryTarget {
        url: "http://127.0.0.1:9090/api/v1/query".into(),
        namespace: "openshift-cnv".into(),
    }
}

fn component_alias() -> AliasMap {
    [("cdi".to_string(), "Containerized Data Importer".to_string())].into()
}

#[tokio::test]
async fn generate_writes_memory_then_cpu_sections() {
    let exec = CannedExec::new(vec![
        Ok(MEMORY_BODY.as_bytes().to_vec()),
        Ok(CPU_BODY.as_bytes().to_vec()),
    ]);
    let dir = tempfile::TempDir::new().unwrap();
    let alias = component_alias();

    let path = MetricsReporter::new(&exec, target(), &alias, dir.path())
        .generate()
        .await
        .expect("generate");

    assert_eq!(path, dir.path().join(METRICS_REPORT_FILE));
    let report = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        report,
        "MEMORY CONSUMPTION\n\
         Containerized Data Importer : 12.5\n\
         compute : 410.25\n\
         unassigned : 3\n\
         \n\n\n\
         CPU CONSUMPTION\n\
         compute : 0.31\n\
         \n\n\n"
    );

    let commands = exec.commands.borrow();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0][0], "curl");
    assert!(commands[0][3].starts_with("query=sum by (label_app_kubernetes_io_component)"));
    assert!(commands[0][3].contains("container_memory_usage_bytes"));
    assert!(commands[1][3].contains("pod:container_cpu_usage:sum"));
    assert_eq!(commands[1][4], "http://127.0.0.1:9090/api/v1/query");
}

#[tokio::test]
async fn failed_query_leaves_no_report() {
    let exec = CannedExec::new(vec![
        Ok(MEMORY_BODY.as_bytes().to_vec()),
        Ok(br#"{"status":"error","errorType":"timeout","error":"query timed out"}"#.to_vec()),
    ]);
    let dir = tempfile::TempDir::new().unwrap();
    let alias = AliasMap::new();

    let err = MetricsReporter::new(&exec, target(), &alias, dir.path())
        .generate()
        .await
        .unwrap_err();

    assert!(matches!(err, ReportError::QueryNotSuccessful { .. }));
    assert!(err.to_string().contains("query timed out"));
    assert!(!dir.path().join(METRICS_REPORT_FILE).exists());
}

#[tokio::test]
async fn exec_failure_propagates() {
    let exec = CannedExec::new(vec![Err(ReportError::Io(std::io::Error::other(
        "connection refused",
    )))]);
    let dir = tempfile::TempDir::new().unwrap();
    let alias = AliasMap::new();

    let err = MetricsReporter::new(&exec, target(), &alias, dir.path())
        .generate()
        .await
        .unwrap_err();
    assert!(err.to_string().contains("connection refused"));
    assert_eq!(exec.commands.borrow().len(), 1);
}

#[test]
fn single_cdi_row_scenario() {
    let body = br#"{"status":"success","data":{"result":[{"metric":{"label_app_kubernetes_io_component":"cdi"},"value":[0,"12.5"]}]}}"#;

    let plain = parse_response(body, &AliasMap::new()).unwrap();
    assert_eq!(plain.iter().collect::<Vec<_>>(), vec![("cdi", "12.5")]);

    let aliased = parse_response(body, &component_alias()).unwrap();
    assert_eq!(aliased.get("Containerized Data Importer"), Some("12.5"));
    assert_eq!(aliased.get("cdi"), None);
}

#[test]
fn error_status_carries_full_response() {
    let body = br#"{"status":"error","errorType":"bad_data","error":"1:1: parse error"}"#;
    let err = parse_response(body, &AliasMap::new()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("not success"));
    assert!(msg.contains("\"errorType\":\"bad_data\""));
}
