//! Cluster-facing capabilities consumed by the status checker.

use async_trait::async_trait;

use rollwatch_core::Workload;

/// Lists the workloads a run created.
#[async_trait]
pub trait WorkloadDiscovery: Send + Sync {
    /// Workloads in `namespace` labelled with `run_id`.
    async fn list_workloads(&self, namespace: &str, run_id: &str) -> anyhow::Result<Vec<Workload>>;
}

/// Runs one rollout-status query for a workload.
///
/// Implementations carry their own cluster context and namespace. An `Err`
/// means the query could not be executed at all and is never retried.
#[async_trait]
pub trait RolloutStatusQuery: Send + Sync {
    async fn rollout_status(&self, name: &str) -> anyhow::Result<String>;
}
