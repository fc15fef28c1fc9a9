//! rollwatch.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};

/// Default upper bound on how long any single workload may take to roll out.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(600);

/// Default delay between two rollout-status queries for the same workload.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub const DEFAULT_NAMESPACE: &str = "default";

pub const DEFAULT_KUBECTL: &str = "kubectl";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RollwatchConfig {
    pub cluster: Option<ClusterConfig>,
    pub status_check: Option<StatusCheckSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterConfig {
    pub namespace: Option<String>,
    pub context: Option<String>,
    pub kubectl: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusCheckSection {
    /// Default per-workload deadline (e.g., "10m").
    pub deadline: Option<String>,
    /// Poll interval (e.g., "100ms").
    pub poll_interval: Option<String>,
}

impl RollwatchConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn namespace(&self) -> &str {
        self.cluster
            .as_ref()
            .and_then(|c| c.namespace.as_deref())
            .unwrap_or(DEFAULT_NAMESPACE)
    }

    pub fn context(&self) -> Option<&str> {
        self.cluster.as_ref().and_then(|c| c.context.as_deref())
    }

    pub fn kubectl(&self) -> &str {
        self.cluster
            .as_ref()
            .and_then(|c| c.kubectl.as_deref())
            .unwrap_or(DEFAULT_KUBECTL)
    }

    /// Configured default deadline, or [`DEFAULT_DEADLINE`] when unset.
    pub fn deadline(&self) -> ConfigResult<Duration> {
        match self.status_check.as_ref().and_then(|s| s.deadline.as_deref()) {
            Some(s) => parse_duration(s),
            None => Ok(DEFAULT_DEADLINE),
        }
    }

    /// Configured poll interval, or [`DEFAULT_POLL_INTERVAL`] when unset.
    pub fn poll_interval(&self) -> ConfigResult<Duration> {
        match self
            .status_check
            .as_ref()
            .and_then(|s| s.poll_interval.as_deref())
        {
            Some(s) => parse_duration(s),
            None => Ok(DEFAULT_POLL_INTERVAL),
        }
    }
}

/// Parse a duration string like "5s", "500ms", "2m". A bare number is seconds.
pub fn parse_duration(s: &str) -> ConfigResult<Duration> {
    let trimmed = s.trim();
    let parsed = if let Some(secs) = trimmed.strip_suffix('s') {
        if let Some(ms) = secs.strip_suffix('m') {
            ms.parse::<u64>().ok().map(Duration::from_millis)
        } else {
            secs.parse::<u64>().ok().map(Duration::from_secs)
        }
    } else if let Some(mins) = trimmed.strip_suffix('m') {
        mins.parse::<u64>()
            .ok()
            .and_then(|m| m.checked_mul(60))
            .map(Duration::from_secs)
    } else {
        trimmed.parse::<u64>().ok().map(Duration::from_secs)
    };
    parsed.ok_or_else(|| ConfigError::InvalidDuration(s.to_string()))
}
