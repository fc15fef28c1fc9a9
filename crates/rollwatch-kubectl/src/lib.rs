//! rollwatch-kubectl — cluster access through the `kubectl` binary.
//!
//! Implements the status checker's two capabilities by shelling out:
//!
//! - **`cli`** — `KubectlCli`, argument building and process execution;
//!   implements `RolloutStatusQuery` via `rollout status --watch=false`
//!   and `WorkloadDiscovery` via `get deployments -o json`
//! - **`discovery`** — parsing `kubectl get -o json` output into `Workload`s
//! - **`error`** — process and parse errors

pub mod cli;
pub mod discovery;
pub mod error;

pub use cli::KubectlCli;
pub use discovery::parse_deployment_list;
pub use error::{KubectlError, KubectlResult};
