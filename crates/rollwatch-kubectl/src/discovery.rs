//! Parsing of `kubectl get deployments -o json`.

use std::collections::BTreeMap;

use serde::Deserialize;

use rollwatch_core::Workload;

use crate::error::KubectlResult;

#[derive(Debug, Deserialize)]
struct DeploymentList {
    #[serde(default)]
    items: Vec<Deployment>,
}

#[derive(Debug, Deserialize)]
struct Deployment {
    metadata: ObjectMeta,
    #[serde(default)]
    spec: DeploymentSpec,
}

#[derive(Debug, Deserialize)]
struct ObjectMeta {
    name: String,
    #[serde(default)]
    namespace: String,
    #[serde(default)]
    labels: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentSpec {
    progress_deadline_seconds: Option<u32>,
}

/// Parse a `DeploymentList` document into workload descriptors.
pub fn parse_deployment_list(json: &str) -> KubectlResult<Vec<Workload>> {
    let list: DeploymentList = serde_json::from_str(json)?;
    Ok(list
        .items
        .into_iter()
        .map(|d| Workload {
            name: d.metadata.name,
            namespace: d.metadata.namespace,
            labels: d.metadata.labels,
            progress_deadline_seconds: d.spec.progress_deadline_seconds,
        })
        .collect())
}
