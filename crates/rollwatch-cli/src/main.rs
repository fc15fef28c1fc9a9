use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "rollwatch",
    about = "rollwatch — wait for a run's deployments to finish rolling out",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wait until every deployment labelled with a run ID is ready.
    ///
    /// Prints one line per deployment as it finishes and exits non-zero if
    /// any deployment fails or misses its deadline.
    Check(commands::check::CheckArgs),
    /// Mint a new run ID and print its label selector.
    RunId,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the status summary.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rollwatch=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => commands::check::check(args).await,
        Commands::RunId => {
            commands::run_id::run_id();
            Ok(())
        }
    }
}
