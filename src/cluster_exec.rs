// Running commands inside a cluster container via `oc exec` / `kubectl exec`

use crate::error::{ReportError, Result};
use tokio::process::Command;
use tracing::debug;

/// Runs a command inside a container and returns its stdout.
pub trait ClusterExec {
    fn exec(&self, command: &[String]) -> impl Future<Output = Result<Vec<u8>>>;
}

/// Shells out to a cluster CLI: `<cli> exec -n <namespace> <pod> -c <container> -- <command...>`.
#[derive(Debug, Clone)]
pub struct CliExec {
    pub cli: String,
    pub namespace: String,
    pub pod: String,
    pub container: String,
}

impl CliExec {
    pub fn args(&self, command: &[String]) -> Vec<String> {
        let mut args = vec![
            "exec".to_string(),
            "-n".to_string(),
            self.namespace.clone(),
            self.pod.clone(),
            "-c".to_string(),
            self.container.clone(),
            "--".to_string(),
        ];
        args.extend(command.iter().cloned());
        args
    }
}

impl ClusterExec for CliExec {
    async fn exec(&self, command: &[String]) -> Result<Vec<u8>> {
        let args = self.args(command);
        debug!(cli = %self.cli, pod = %self.pod, "cluster exec");

        let output = Command::new(&self.cli)
            .args(&args)
            .output()
            .await
            .map_err(|source| ReportError::Spawn {
                program: self.cli.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ReportError::CommandFailed {
                program: self.cli.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exec_with(cli: &str) -> CliExec {
        CliExec {
            cli: cli.into(),
            namespace: "openshift-monitoring".into(),
            pod: "prometheus-k8s-0".into(),
            container: "prometheus".into(),
        }
    }

    #[test]
    fn args_target_pod_and_container() {
        let args = exec_with("oc").args(&["curl".into(), "--silent".into()]);
        assert_eq!(
            args,
            vec![
                "exec",
                "-n",
                "openshift-monitoring",
                "prometheus-k8s-0",
                "-c",
                "prometheus",
                "--",
                "curl",
                "--silent"
            ]
        );
    }

    #[tokio::test]
    async fn missing_binary_is_spawn_error() {
        let err = exec_with("labelviz-no-such-cli")
            .exec(&["true".into()])
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Spawn { .. }));
    }

    #[tokio::test]
    async fn non_zero_exit_is_command_failed() {
        let err = exec_with("false").exec(&["true".into()]).await.unwrap_err();
        match err {
            ReportError::CommandFailed { program, status, .. } => {
                assert_eq!(program, "false");
                assert!(!status.success());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
