//! `rollwatch check` — wait for a run's deployments to stabilize.
//!
//! Settings come from flags first, then `rollwatch.toml`, then defaults.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use rollwatch_core::{Labeller, RollwatchConfig, parse_duration};
use rollwatch_kubectl::KubectlCli;
use rollwatch_status::{StatusCheckConfig, StatusChecker};

const DEFAULT_CONFIG_FILE: &str = "rollwatch.toml";

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Run ID the deployments were labelled with.
    #[arg(long)]
    pub run_id: String,
    /// Namespace to check.
    #[arg(short, long)]
    pub namespace: Option<String>,
    /// kubeconfig context to use.
    #[arg(long)]
    pub context: Option<String>,
    /// Default per-deployment deadline (e.g. "10m", "90s").
    #[arg(long)]
    pub deadline: Option<String>,
    /// Delay between status queries (e.g. "100ms").
    #[arg(long)]
    pub poll_interval: Option<String>,
    /// Config file (default: ./rollwatch.toml if present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Effective settings after merging flags, file, and defaults.
#[derive(Debug)]
struct Settings {
    status: StatusCheckConfig,
    context: Option<String>,
    kubectl: String,
}

pub async fn check(args: CheckArgs) -> Result<()> {
    let file_config = load_config(args.config.as_deref())?;
    let settings = resolve_settings(&args, &file_config)?;
    let labeller = Labeller::with_run_id(&args.run_id);

    let kubectl = Arc::new(
        KubectlCli::new(&settings.status.namespace)
            .with_context(settings.context.as_deref())
            .with_program(&settings.kubectl),
    );
    info!(
        run_id = %labeller.run_id(),
        namespace = %settings.status.namespace,
        deadline = ?settings.status.default_deadline,
        "starting status check"
    );

    let stdout = Arc::new(Mutex::new(std::io::stdout()));
    {
        let mut out = stdout.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        writeln!(out, "Waiting for deployments to stabilize")?;
    }

    let checker = StatusChecker::new(settings.status, kubectl.clone(), kubectl);
    checker
        .check(labeller.run_id(), stdout)
        .await
        .context("status check failed")?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<RollwatchConfig> {
    match path {
        Some(path) => Ok(RollwatchConfig::from_file(path)?),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.is_file() {
                Ok(RollwatchConfig::from_file(default)?)
            } else {
                Ok(RollwatchConfig::default())
            }
        }
    }
}

fn resolve_settings(args: &CheckArgs, file: &RollwatchConfig) -> Result<Settings> {
    let namespace = args.namespace.as_deref().unwrap_or(file.namespace());
    let deadline = match &args.deadline {
        Some(s) => parse_duration(s).context("invalid --deadline")?,
        None => file.deadline()?,
    };
    let poll_interval = match &args.poll_interval {
        Some(s) => parse_duration(s).context("invalid --poll-interval")?,
        None => file.poll_interval()?,
    };

    Ok(Settings {
        status: StatusCheckConfig::new(namespace)
            .with_deadline(deadline)
            .with_poll_interval(poll_interval),
        context: args.context.clone().or_else(|| file.context().map(str::to_string)),
        kubectl: file.kubectl().to_string(),
    })
}
