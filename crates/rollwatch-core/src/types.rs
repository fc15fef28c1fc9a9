//! Domain types shared across rollwatch crates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::labeller::RUN_ID_LABEL;

/// A workload whose rollout is tracked, as seen at discovery time.
///
/// This is a read-only snapshot; nothing mutates it after discovery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workload {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Workload-level progress ceiling, in seconds.
    #[serde(default)]
    pub progress_deadline_seconds: Option<u32>,
}

impl Workload {
    /// Create a descriptor with no labels and no declared deadline.
    pub fn new(name: &str, namespace: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            labels: BTreeMap::new(),
            progress_deadline_seconds: None,
        }
    }

    /// Add a label.
    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.labels.insert(key.to_string(), value.to_string());
        self
    }

    /// Set the declared progress deadline.
    pub fn with_deadline_seconds(mut self, secs: u32) -> Self {
        self.progress_deadline_seconds = Some(secs);
        self
    }

    /// Whether this workload was created by the run identified by `run_id`.
    pub fn belongs_to_run(&self, run_id: &str) -> bool {
        self.labels.get(RUN_ID_LABEL).map(String::as_str) == Some(run_id)
    }
}
