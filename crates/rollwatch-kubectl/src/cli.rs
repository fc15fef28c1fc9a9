//! `kubectl` invocation.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::trace;

use rollwatch_core::config::DEFAULT_KUBECTL;
use rollwatch_core::{Labeller, Workload};
use rollwatch_status::{RolloutStatusQuery, WorkloadDiscovery};

use crate::discovery::parse_deployment_list;
use crate::error::{KubectlError, KubectlResult};

/// A `kubectl` bound to one cluster context and namespace.
#[derive(Debug, Clone)]
pub struct KubectlCli {
    program: String,
    context: Option<String>,
    namespace: String,
}

impl KubectlCli {
    pub fn new(namespace: &str) -> Self {
        Self {
            program: DEFAULT_KUBECTL.to_string(),
            context: None,
            namespace: namespace.to_string(),
        }
    }

    /// Use an explicit kubeconfig context instead of the current one.
    pub fn with_context(mut self, context: Option<&str>) -> Self {
        self.context = context.map(str::to_string);
        self
    }

    /// Use a different binary (e.g. a pinned path or a test stand-in).
    pub fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Full argument list: `[--context C] --namespace N <rest...>`.
    pub fn args(&self, namespace: &str, rest: &[&str]) -> Vec<String> {
        let mut args = Vec::with_capacity(rest.len() + 4);
        if let Some(ctx) = &self.context {
            args.push("--context".to_string());
            args.push(ctx.clone());
        }
        args.push("--namespace".to_string());
        args.push(namespace.to_string());
        args.extend(rest.iter().map(|s| s.to_string()));
        args
    }

    /// Run kubectl and return its stdout.
    pub async fn run(&self, namespace: &str, rest: &[&str]) -> KubectlResult<String> {
        let args = self.args(namespace, rest);
        trace!(program = %self.program, ?args, "spawn");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| KubectlError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(KubectlError::Failed {
                command: format!("{} {}", self.program, args.join(" ")),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl RolloutStatusQuery for KubectlCli {
    async fn rollout_status(&self, name: &str) -> anyhow::Result<String> {
        let out = self
            .run(
                &self.namespace,
                &["rollout", "status", "deployment", name, "--watch=false"],
            )
            .await?;
        Ok(out.trim().to_string())
    }
}

#[async_trait]
impl WorkloadDiscovery for KubectlCli {
    async fn list_workloads(&self, namespace: &str, run_id: &str) -> anyhow::Result<Vec<Workload>> {
        let selector = Labeller::with_run_id(run_id).selector();
        let out = self
            .run(namespace, &["get", "deployments", "-l", selector.as_str(), "-o", "json"])
            .await?;
        Ok(parse_deployment_list(&out)?)
    }
}
