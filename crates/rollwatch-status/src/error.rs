//! Status check error types.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

pub type StatusCheckResult<T> = Result<T, StatusCheckError>;

/// Why a single workload's rollout did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RolloutError {
    /// The status query itself failed to run.
    #[error("{0}")]
    Query(String),

    #[error("could not stabilize within {deadline:?}")]
    Timeout { deadline: Duration },

    /// The poller task panicked or was cancelled before finishing.
    #[error("status check aborted: {0}")]
    Aborted(String),
}

/// One failing workload inside an [`AggregateError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadFailure {
    pub name: String,
    pub cause: RolloutError,
}

impl fmt::Display for WorkloadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deployment {} failed due to {}", self.name, self.cause)
    }
}

/// Every workload that ended in error during one check cycle.
///
/// Renders one `deployment <name> failed due to <cause>` line per failure.
/// Order follows the result store and is not stable across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateError {
    pub failures: Vec<WorkloadFailure>,
}

impl AggregateError {
    /// Names of the failing workloads.
    pub fn failed_names(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.name.as_str())
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}

/// Errors surfaced by [`StatusChecker::check`](crate::StatusChecker::check).
#[derive(Debug, Error)]
pub enum StatusCheckError {
    /// Listing the run's workloads failed; no pollers were started.
    #[error("could not fetch deployments: {0:#}")]
    Discovery(anyhow::Error),

    #[error(transparent)]
    Failed(#[from] AggregateError),
}
