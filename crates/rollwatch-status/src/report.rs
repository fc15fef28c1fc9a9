//! Summary lines for finished workloads.

use std::io::{self, Write};

use tracing::debug;

use crate::counter::PendingCounter;
use crate::error::RolloutError;

/// Write the one summary line for a workload that reached a terminal outcome.
///
/// `pending` is the value this workload's `mark_processed()` returned. The
/// line is assembled first and written with a single `write_all`.
pub fn print_status_check_summary<W: Write + ?Sized>(
    out: &mut W,
    name: &str,
    counter: &PendingCounter,
    pending: usize,
    err: Option<&RolloutError>,
) -> io::Result<()> {
    let pending_msg = counter.pending_message(pending);
    let mut line = format!(" - deployment/{name}");
    match err {
        None => line.push_str(" is ready."),
        Some(_) => line.push_str(" failed."),
    }
    if !pending_msg.is_empty() {
        line.push(' ');
        line.push_str(&pending_msg);
    }
    if let Some(e) = err {
        line.push_str(&format!(" Error: {e}."));
    }
    line.push('\n');
    out.write_all(line.as_bytes())
}

/// Note a non-terminal status. Goes to the log, not the summary sink.
pub(crate) fn report_progress(name: &str, status: &str) {
    debug!(deployment = %name, status = %status.trim(), "rollout in progress");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(pending: usize, err: Option<RolloutError>) -> String {
        let mut out = Vec::new();
        let counter = PendingCounter::new(10);
        print_status_check_summary(&mut out, "dep", &counter, pending, err.as_ref()).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn expired() -> Option<RolloutError> {
        Some(RolloutError::Query("context deadline expired".into()))
    }

    #[test]
    fn ready_with_nothing_pending() {
        assert_eq!(summary(0, None), " - deployment/dep is ready.\n");
    }

    #[test]
    fn failed_with_nothing_pending() {
        assert_eq!(
            summary(0, expired()),
            " - deployment/dep failed. Error: context deadline expired.\n"
        );
    }

    #[test]
    fn ready_with_others_pending() {
        assert_eq!(
            summary(4, None),
            " - deployment/dep is ready. [4/10 deployment(s) still pending]\n"
        );
    }

    #[test]
    fn failed_with_others_pending() {
        assert_eq!(
            summary(8, expired()),
            " - deployment/dep failed. [8/10 deployment(s) still pending] Error: context deadline expired.\n"
        );
    }

    #[test]
    fn timeout_cause_is_rendered() {
        let err = RolloutError::Timeout {
            deadline: std::time::Duration::from_secs(30),
        };
        assert_eq!(
            summary(0, Some(err)),
            " - deployment/dep failed. Error: could not stabilize within 30s.\n"
        );
    }
}
