use thiserror::Error;

pub type KubectlResult<T> = Result<T, KubectlError>;

#[derive(Debug, Error)]
pub enum KubectlError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("invalid kubectl output: {0}")]
    Parse(#[from] serde_json::Error),
}
