//! Status checker — the composition root for one check cycle.
//!
//! Resolves deadlines, spawns one poller task per workload, reports each
//! workload as it finishes, waits for every task, then aggregates.

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{error, info, warn};

use rollwatch_core::config::{DEFAULT_DEADLINE, DEFAULT_NAMESPACE, DEFAULT_POLL_INTERVAL};

use crate::counter::PendingCounter;
use crate::deadline::get_deployments;
use crate::error::{RolloutError, StatusCheckError, StatusCheckResult};
use crate::poller::poll_rollout_status;
use crate::report::print_status_check_summary;
use crate::source::{RolloutStatusQuery, WorkloadDiscovery};
use crate::store::{ResultStore, RolloutOutcome};

/// Settings for one status check cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCheckConfig {
    pub namespace: String,
    /// Upper bound for every workload; declared deadlines may only shorten it.
    pub default_deadline: Duration,
    pub poll_interval: Duration,
}

impl StatusCheckConfig {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            ..Self::default()
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.default_deadline = deadline;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl Default for StatusCheckConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            default_deadline: DEFAULT_DEADLINE,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Checks that every workload of a run rolls out before its deadline.
pub struct StatusChecker {
    config: StatusCheckConfig,
    discovery: Arc<dyn WorkloadDiscovery>,
    query: Arc<dyn RolloutStatusQuery>,
}

impl StatusChecker {
    pub fn new(
        config: StatusCheckConfig,
        discovery: Arc<dyn WorkloadDiscovery>,
        query: Arc<dyn RolloutStatusQuery>,
    ) -> Self {
        Self {
            config,
            discovery,
            query,
        }
    }

    pub fn config(&self) -> &StatusCheckConfig {
        &self.config
    }

    /// Run one check cycle for the workloads labelled with `run_id`.
    ///
    /// Writes one summary line per workload to `out` as each finishes.
    /// Only a discovery failure ends the cycle early; otherwise every
    /// poller runs to a terminal outcome before the verdict is returned.
    pub async fn check<W>(&self, run_id: &str, out: Arc<Mutex<W>>) -> StatusCheckResult<()>
    where
        W: Write + Send + 'static,
    {
        let deadlines = get_deployments(
            self.discovery.as_ref(),
            &self.config.namespace,
            run_id,
            self.config.default_deadline,
        )
        .await
        .map_err(StatusCheckError::Discovery)?;

        info!(
            namespace = %self.config.namespace,
            deployments = deadlines.len(),
            "waiting for deployments to stabilize"
        );

        let counter = Arc::new(PendingCounter::new(deadlines.len()));
        let results = ResultStore::new();
        let mut tasks = JoinSet::new();
        let mut task_names = HashMap::new();

        for (name, deadline) in deadlines {
            let query = Arc::clone(&self.query);
            let counter = Arc::clone(&counter);
            let results = results.clone();
            let out = Arc::clone(&out);
            let poll_interval = self.config.poll_interval;
            let task_name = name.clone();

            let handle = tasks.spawn(async move {
                let result =
                    poll_rollout_status(query.as_ref(), &name, deadline, poll_interval).await;
                finish(&name, result.into(), &counter, &results, out.as_ref());
            });
            task_names.insert(handle.id(), task_name);
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            if let Err(e) = joined {
                let Some(name) = task_names.remove(&e.id()) else {
                    error!(error = %e, "unknown status check task failed");
                    continue;
                };
                error!(deployment = %name, error = %e, "status check task did not finish");
                let outcome = RolloutOutcome::Failed(RolloutError::Aborted(e.to_string()));
                finish(&name, outcome, &counter, &results, out.as_ref());
            }
        }

        results.aggregate()?;
        info!("all deployments stabilized");
        Ok(())
    }
}

/// Count, report, and record one workload's terminal outcome.
fn finish<W: Write + ?Sized>(
    name: &str,
    outcome: RolloutOutcome,
    counter: &PendingCounter,
    results: &ResultStore,
    out: &Mutex<W>,
) {
    let pending = counter.mark_processed();
    let err = match &outcome {
        RolloutOutcome::Failed(e) => Some(e),
        RolloutOutcome::Success | RolloutOutcome::Running(_) => None,
    };
    {
        let mut sink = out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = print_status_check_summary(&mut *sink, name, counter, pending, err) {
            warn!(deployment = %name, error = %e, "failed to write status summary");
        }
    }
    results.record(name, outcome);
}
