//! Rollout poller — drives one workload to a terminal outcome.
//!
//! Queries immediately, then once per poll interval, until the rollout
//! reports success, the query fails outright, or the deadline elapses.
//! Queries for one workload never overlap.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::RolloutError;
use crate::report::report_progress;
use crate::source::RolloutStatusQuery;

/// Text in a status query's output that marks a completed rollout.
pub const SUCCESS_MARKER: &str = "successfully rolled out";

/// Poll `name` until it rolls out, fails, or `deadline` passes.
///
/// Each query is bounded by whatever is left of the deadline, so a hung
/// query still ends in [`RolloutError::Timeout`].
pub async fn poll_rollout_status(
    query: &dyn RolloutStatusQuery,
    name: &str,
    deadline: Duration,
    poll_interval: Duration,
) -> Result<(), RolloutError> {
    let started = Instant::now();

    loop {
        let remaining = deadline.saturating_sub(started.elapsed());
        let status = match tokio::time::timeout(remaining, query.rollout_status(name)).await {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                warn!(deployment = %name, error = %e, "rollout status query failed");
                return Err(RolloutError::Query(format!("{e:#}")));
            }
            Err(_) => {
                debug!(deployment = %name, ?deadline, "status query outlived deadline");
                return Err(RolloutError::Timeout { deadline });
            }
        };

        if is_rolled_out(&status) {
            debug!(deployment = %name, elapsed = ?started.elapsed(), "rollout complete");
            return Ok(());
        }
        report_progress(name, &status);

        tokio::time::sleep(poll_interval).await;

        if started.elapsed() >= deadline {
            return Err(RolloutError::Timeout { deadline });
        }
    }
}

fn is_rolled_out(status: &str) -> bool {
    status.contains(SUCCESS_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    const POLL: Duration = Duration::from_millis(10);

    /// Replays scripted responses; the last one repeats forever.
    struct ScriptedQuery {
        script: Mutex<VecDeque<Result<String, String>>>,
        calls: AtomicUsize,
    }

    impl ScriptedQuery {
        fn new(script: Vec<Result<&str, &str>>) -> Self {
            Self {
                script: Mutex::new(
                    script
                        .into_iter()
                        .map(|r| r.map(str::to_string).map_err(str::to_string))
                        .collect(),
                ),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RolloutStatusQuery for ScriptedQuery {
        async fn rollout_status(&self, _name: &str) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            let next = if script.len() > 1 {
                script.pop_front().unwrap()
            } else {
                script.front().cloned().unwrap()
            };
            next.map_err(|e| anyhow::anyhow!(e))
        }
    }

    /// Never answers.
    struct HangingQuery;

    #[async_trait]
    impl RolloutStatusQuery for HangingQuery {
        async fn rollout_status(&self, _name: &str) -> anyhow::Result<String> {
            std::future::pending::<anyhow::Result<String>>().await
        }
    }

    #[tokio::test]
    async fn success_on_first_query_does_not_retry() {
        let query = ScriptedQuery::new(vec![Ok("deployment \"dep\" successfully rolled out")]);
        let result = poll_rollout_status(&query, "dep", Duration::from_millis(50), POLL).await;
        assert_eq!(result, Ok(()));
        assert_eq!(query.calls(), 1);
    }

    #[tokio::test]
    async fn query_failure_is_returned_without_retry() {
        let query = ScriptedQuery::new(vec![Err("deployment.apps/dep could not be found")]);
        let result = poll_rollout_status(&query, "dep", Duration::from_millis(50), POLL).await;
        assert_eq!(
            result,
            Err(RolloutError::Query("deployment.apps/dep could not be found".into()))
        );
        assert_eq!(query.calls(), 1);
    }

    #[tokio::test]
    async fn success_after_progress_updates() {
        let query = ScriptedQuery::new(vec![
            Ok("Waiting for rollout to finish: 1 of 3 updated replicas are available..."),
            Ok("Waiting for rollout to finish: 2 of 3 updated replicas are available..."),
            Ok("dep successfully rolled out"),
        ]);
        let result = poll_rollout_status(&query, "dep", Duration::from_secs(5), POLL).await;
        assert_eq!(result, Ok(()));
        assert_eq!(query.calls(), 3);
    }

    #[tokio::test]
    async fn times_out_when_rollout_never_stabilizes() {
        let deadline = Duration::from_millis(20);
        let query = ScriptedQuery::new(vec![
            Ok("Waiting for rollout to finish: 1 of 3 updated replicas are available..."),
            Ok("Waiting for rollout to finish: 1 of 3 updated replicas are available..."),
            Ok("Waiting for rollout to finish: 2 of 3 updated replicas are available..."),
        ]);
        let result = poll_rollout_status(&query, "dep", deadline, POLL).await;
        assert_eq!(result, Err(RolloutError::Timeout { deadline }));

        let max_calls = deadline.as_millis().div_ceil(POLL.as_millis()) as usize + 1;
        assert!(query.calls() >= 1);
        assert!(query.calls() <= max_calls, "{} queries issued", query.calls());
    }

    #[tokio::test]
    async fn empty_status_is_not_success() {
        let deadline = Duration::from_millis(20);
        let query = ScriptedQuery::new(vec![Ok("")]);
        let result = poll_rollout_status(&query, "dep", deadline, POLL).await;
        assert_eq!(result, Err(RolloutError::Timeout { deadline }));
    }

    #[tokio::test]
    async fn hung_query_is_cut_off_at_deadline() {
        let deadline = Duration::from_millis(30);
        let started = Instant::now();
        let result = poll_rollout_status(&HangingQuery, "dep", deadline, POLL).await;
        assert_eq!(result, Err(RolloutError::Timeout { deadline }));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn success_marker_matches_kubectl_output() {
        assert!(is_rolled_out("deployment \"web\" successfully rolled out\n"));
        assert!(!is_rolled_out("Waiting for deployment \"web\" rollout to finish"));
        assert!(!is_rolled_out(""));
    }
}
