//! Run labelling.
//!
//! Every resource created by one rollwatch invocation carries the same
//! run identifier under [`RUN_ID_LABEL`], which is how status checks are
//! scoped to "what this run deployed".

use std::collections::BTreeMap;

/// Label key carrying the run identifier.
pub const RUN_ID_LABEL: &str = "rollwatch.dev/run-id";

/// Holds the run identifier for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labeller {
    run_id: String,
}

impl Labeller {
    /// Mint a fresh run identifier.
    pub fn new() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Adopt an identifier minted elsewhere (e.g. by the apply step).
    pub fn with_run_id(run_id: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Labels to stamp on every resource this run creates.
    pub fn labels(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(RUN_ID_LABEL.to_string(), self.run_id.clone())])
    }

    /// Label selector (`key=value`) matching this run's resources.
    pub fn selector(&self) -> String {
        format!("{RUN_ID_LABEL}={}", self.run_id)
    }
}

impl Default for Labeller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_labellers_have_distinct_ids() {
        let a = Labeller::new();
        let b = Labeller::new();
        assert_ne!(a.run_id(), b.run_id());
        assert!(!a.run_id().is_empty());
    }

    #[test]
    fn selector_and_labels_agree() {
        let l = Labeller::with_run_id("1234-abcd");
        assert_eq!(l.selector(), "rollwatch.dev/run-id=1234-abcd");
        assert_eq!(
            l.labels().get(RUN_ID_LABEL).map(String::as_str),
            Some("1234-abcd")
        );
    }
}
