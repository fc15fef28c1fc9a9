//! Pending counter — how many workloads are still being checked.
//!
//! Every poller calls [`PendingCounter::mark_processed`] exactly once when
//! it reaches a terminal outcome. The decrement and the read of the new
//! value are one atomic step, so concurrent callers each observe a
//! distinct value and a progress line never repeats or skips a count.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Race-free countdown of workloads still pending.
#[derive(Debug)]
pub struct PendingCounter {
    total: usize,
    pending: AtomicUsize,
}

impl PendingCounter {
    /// Create a counter with all `total` workloads pending.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            pending: AtomicUsize::new(total),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Current pending count (diagnostics only; may be stale immediately).
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Mark one workload done and return the pending count after it.
    ///
    /// Never goes below zero; extra calls past `total` return 0.
    pub fn mark_processed(&self) -> usize {
        match self
            .pending
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |p| p.checked_sub(1))
        {
            Ok(previous) => previous - 1,
            Err(_) => 0,
        }
    }

    /// Progress fragment for a value returned by [`mark_processed`](Self::mark_processed).
    ///
    /// Empty once nothing is pending.
    pub fn pending_message(&self, pending: usize) -> String {
        if pending == 0 {
            return String::new();
        }
        format!("[{pending}/{} deployment(s) still pending]", self.total)
    }
}
