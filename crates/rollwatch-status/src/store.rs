//! Result store and aggregation.
//!
//! Each poller records its workload's outcome under its own name. Once all
//! pollers are done, [`ResultStore::aggregate`] folds the store into a
//! single verdict that names every failing workload.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::{AggregateError, RolloutError, WorkloadFailure};

/// Outcome recorded for one workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RolloutOutcome {
    Success,
    /// Still rolling out; carries the last status text.
    Running(String),
    Failed(RolloutError),
}

impl From<Result<(), RolloutError>> for RolloutOutcome {
    fn from(result: Result<(), RolloutError>) -> Self {
        match result {
            Ok(()) => Self::Success,
            Err(e) => Self::Failed(e),
        }
    }
}

/// Concurrency-safe map of workload name → outcome.
///
/// Cheap to clone; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    inner: Arc<RwLock<HashMap<String, RolloutOutcome>>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for `name`, replacing any earlier one.
    pub fn record(&self, name: &str, outcome: RolloutOutcome) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(name.to_string(), outcome);
    }

    pub fn get(&self, name: &str) -> Option<RolloutOutcome> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reduce the store to `Ok` or one error listing every failure.
    ///
    /// `Success` and `Running` entries are ignored.
    pub fn aggregate(&self) -> Result<(), AggregateError> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let failures: Vec<WorkloadFailure> = map
            .iter()
            .filter_map(|(name, outcome)| match outcome {
                RolloutOutcome::Failed(cause) => Some(WorkloadFailure {
                    name: name.clone(),
                    cause: cause.clone(),
                }),
                RolloutOutcome::Success | RolloutOutcome::Running(_) => None,
            })
            .collect();

        debug!(workloads = map.len(), failed = failures.len(), "aggregated rollout results");
        if failures.is_empty() {
            Ok(())
        } else {
            Err(AggregateError { failures })
        }
    }
}

impl FromIterator<(String, RolloutOutcome)> for ResultStore {
    fn from_iter<I: IntoIterator<Item = (String, RolloutOutcome)>>(iter: I) -> Self {
        Self {
            inner: Arc::new(RwLock::new(iter.into_iter().collect())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(entries: Vec<(&str, RolloutOutcome)>) -> ResultStore {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn query_err(msg: &str) -> RolloutOutcome {
        RolloutOutcome::Failed(RolloutError::Query(msg.to_string()))
    }

    #[test]
    fn one_error() {
        let s = store(vec![
            ("dep1", RolloutOutcome::Success),
            ("dep2", query_err("could not return within default timeout")),
        ]);
        let err = s.aggregate().unwrap_err();
        assert!(
            err.to_string()
                .contains("deployment dep2 failed due to could not return within default timeout")
        );
        assert_eq!(err.failures.len(), 1);
    }

    #[test]
    fn no_error() {
        let s = store(vec![
            ("dep1", RolloutOutcome::Success),
            ("dep2", RolloutOutcome::Running("RUNNING".into())),
        ]);
        assert_eq!(s.aggregate(), Ok(()));
    }

    #[test]
    fn multiple_errors() {
        let s = store(vec![
            ("dep1", RolloutOutcome::Success),
            ("dep2", query_err("could not return within default timeout")),
            ("dep3", query_err("ERROR")),
        ]);
        let msg = s.aggregate().unwrap_err().to_string();
        assert!(msg.contains("deployment dep2 failed due to could not return within default timeout"));
        assert!(msg.contains("deployment dep3 failed due to ERROR"));
    }

    #[test]
    fn empty_store_is_success() {
        assert!(ResultStore::new().is_empty());
        assert_eq!(ResultStore::new().aggregate(), Ok(()));
    }

    #[test]
    fn clones_share_entries() {
        let s = ResultStore::new();
        let writer = s.clone();
        writer.record("dep1", RolloutOutcome::Success);
        assert_eq!(s.get("dep1"), Some(RolloutOutcome::Success));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn outcome_from_result() {
        assert_eq!(RolloutOutcome::from(Ok(())), RolloutOutcome::Success);
        assert_eq!(
            RolloutOutcome::from(Err(RolloutError::Query("x".into()))),
            query_err("x")
        );
    }
}
