mod report;
mod score;

use clap::{Parser, Subcommand};
use guardify_core::{AppConfig, ConfigError};
use tracing_subscriber::EnvFilter;

use crate::score::ScoreOptions;

#[derive(Debug, Parser)]
#[command(name = "guardify")]
#[command(about = "Score e-commerce listings for low-quality or untrustworthy signals")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score one listing from extracted signals (JSON)
    Score {
        /// Path to a signals JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,
        /// Skip the remote classifier and use the local heuristic only
        #[arg(long)]
        local: bool,
        /// Remote classifier endpoint (overrides `GUARDIFY_REMOTE_URL`)
        #[arg(long)]
        remote_url: Option<String>,
        /// Remote time budget in milliseconds (overrides `GUARDIFY_REMOTE_TIMEOUT_MS`)
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Print the result as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// List the heuristic rules in evaluation order
    Rules,
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Runs one command. Configuration is loaded only by commands that use it, so
/// a malformed environment never blocks `rules`.
async fn run<F>(cli: Cli, load_config: F) -> anyhow::Result<()>
where
    F: FnOnce() -> Result<AppConfig, ConfigError>,
{
    match cli.command {
        Commands::Score {
            input,
            local,
            remote_url,
            timeout_ms,
            json,
        } => {
            let config = load_config()?;
            init_tracing(&config.log_level)?;
            let options = ScoreOptions {
                local,
                remote_url,
                timeout_ms,
                json,
            };
            score::run_score(config, &input, &options).await?;
        }
        Commands::Rules => print!("{}", report::render_rules(guardify_scoring::RULES)),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(Cli::parse(), guardify_core::load_app_config).await
}
