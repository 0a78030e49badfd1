//! `score` command handler.

use std::io::Read;

use anyhow::Context;
use guardify_core::{AppConfig, ExtractedPage, ProductSignals};
use guardify_scoring::{scan, ScanSession, Scorer};

use crate::report::render_report;

/// Flags of the `score` sub-command.
#[derive(Debug, Default)]
pub(crate) struct ScoreOptions {
    pub local: bool,
    pub remote_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub json: bool,
}

/// Applies command-line overrides on top of the environment configuration.
pub(crate) fn apply_overrides(
    mut config: AppConfig,
    options: &ScoreOptions,
) -> anyhow::Result<AppConfig> {
    if options.local {
        config.remote_enabled = false;
    }
    if let Some(url) = &options.remote_url {
        config.remote_url.clone_from(url);
    }
    if let Some(timeout_ms) = options.timeout_ms {
        if timeout_ms == 0 {
            anyhow::bail!("--timeout-ms must be greater than zero");
        }
        config.remote_timeout_ms = timeout_ms;
    }
    Ok(config)
}

/// Reads the raw input document from a file, or from stdin for `-`.
fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read signals from stdin")?;
        return Ok(raw);
    }
    std::fs::read_to_string(input).with_context(|| format!("failed to read signals from {input}"))
}

/// Parses bare signals or the extractor's page envelope.
///
/// # Errors
///
/// Fails on malformed JSON and on pages the extractor did not recognise as
/// product pages.
pub(crate) fn parse_signals(raw: &str) -> anyhow::Result<ProductSignals> {
    let page: ExtractedPage =
        serde_json::from_str(raw).context("input is not a valid signals document")?;
    page.into_signals()
        .ok_or_else(|| anyhow::anyhow!("Open a product page to scan."))
}

/// Scores one listing and prints the report (or JSON) to stdout.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or the remote
/// transport cannot be built. Remote scoring failures are not errors; they
/// fall back to the local heuristic.
pub(crate) async fn run_score(
    config: AppConfig,
    input: &str,
    options: &ScoreOptions,
) -> anyhow::Result<()> {
    let config = apply_overrides(config, options)?;
    let signals = parse_signals(&read_input(input)?)?;

    let scorer = Scorer::from_config(&config).context("failed to build scorer")?;
    tracing::info!(
        remote = config.remote_enabled,
        remote_url = %config.remote_url,
        "scanning listing"
    );

    let session = ScanSession::new();
    let result = scan(&scorer, &session, &signals)
        .await
        .or_else(|| session.latest())
        .context("scan finished without a result")?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_report(&signals, &result));
    }

    Ok(())
}
