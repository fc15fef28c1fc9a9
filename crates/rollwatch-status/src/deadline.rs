//! Deadline resolution — how long each workload of a run may take.
//!
//! A workload's declared progress deadline can shorten the caller's
//! default but never lengthen it.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use rollwatch_core::Workload;

use crate::source::WorkloadDiscovery;

/// Map every workload of `run_id` in `namespace` to its effective deadline.
///
/// Workloads from other runs, unlabelled workloads, and workloads in other
/// namespaces are left out.
pub fn resolve_deadlines(
    workloads: &[Workload],
    namespace: &str,
    run_id: &str,
    default_deadline: Duration,
) -> HashMap<String, Duration> {
    workloads
        .iter()
        .filter(|w| w.namespace == namespace && w.belongs_to_run(run_id))
        .map(|w| {
            let deadline = match w.progress_deadline_seconds {
                Some(secs) => Duration::from_secs(u64::from(secs)).min(default_deadline),
                None => default_deadline,
            };
            debug!(deployment = %w.name, ?deadline, "resolved deadline");
            (w.name.clone(), deadline)
        })
        .collect()
}

/// Discover the run's workloads and resolve their deadlines.
pub async fn get_deployments(
    discovery: &dyn WorkloadDiscovery,
    namespace: &str,
    run_id: &str,
    default_deadline: Duration,
) -> anyhow::Result<HashMap<String, Duration>> {
    let workloads = discovery.list_workloads(namespace, run_id).await?;
    Ok(resolve_deadlines(&workloads, namespace, run_id, default_deadline))
}
