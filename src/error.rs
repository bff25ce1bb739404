// Errors from the metrics pipeline

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("result for prometheus query is not success (status {status:?}). Result: {response}")]
    QueryNotSuccessful { status: String, response: String },

    #[error("invalid prometheus response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
