//! rollwatch-status — rollout status checking for the workloads of one run.
//!
//! After resources are applied, the status checker decides whether every
//! workload this run created converges before its deadline, reports each
//! workload as it finishes, and folds everything into one verdict.
//!
//! # Architecture
//!
//! ```text
//! StatusChecker::check
//!   ├── get_deployments() → name → effective deadline   (once)
//!   ├── one task per workload
//!   │   ├── poll_rollout_status() → Ok / RolloutError
//!   │   ├── PendingCounter::mark_processed()
//!   │   ├── print_status_check_summary() → output sink
//!   │   └── ResultStore::record()
//!   └── ResultStore::aggregate() → Ok / AggregateError   (once, after join)
//! ```
//!
//! Cluster access sits behind the [`WorkloadDiscovery`] and
//! [`RolloutStatusQuery`] traits.

pub mod checker;
pub mod counter;
pub mod deadline;
pub mod error;
pub mod poller;
pub mod report;
pub mod source;
pub mod store;

pub use checker::{StatusCheckConfig, StatusChecker};
pub use counter::PendingCounter;
pub use deadline::{get_deployments, resolve_deadlines};
pub use error::{AggregateError, RolloutError, StatusCheckError, StatusCheckResult, WorkloadFailure};
pub use poller::{SUCCESS_MARKER, poll_rollout_status};
pub use report::print_status_check_summary;
pub use source::{RolloutStatusQuery, WorkloadDiscovery};
pub use store::{ResultStore, RolloutOutcome};
