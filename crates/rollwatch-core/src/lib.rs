//! rollwatch-core — shared types for rollout status checking.
//!
//! Holds the pieces every other rollwatch crate agrees on:
//!
//! - **`types`** — the `Workload` descriptor snapshot taken at discovery time
//! - **`labeller`** — the per-run identifier stamped on created resources
//! - **`config`** — `rollwatch.toml` parsing and duration strings
//! - **`error`** — configuration errors

pub mod config;
pub mod error;
pub mod labeller;
pub mod types;

pub use config::{ClusterConfig, RollwatchConfig, StatusCheckSection, parse_duration};
pub use error::{ConfigError, ConfigResult};
pub use labeller::{Labeller, RUN_ID_LABEL};
pub use types::Workload;
