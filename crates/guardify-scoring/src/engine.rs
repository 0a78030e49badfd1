//! Strategy selection and the end-to-end scan flow.

use std::time::Duration;

use guardify_core::{AppConfig, ProductSignals, ScoreResult};

use crate::error::ScoringError;
use crate::heuristic::score_local;
use crate::remote::{HttpTransport, RemoteScorer, RemoteTransport};
use crate::session::ScanSession;

/// How listings get scored: locally only, or remote-first with local fallback.
#[derive(Debug)]
pub enum Scorer<T = HttpTransport> {
    Local,
    RemoteFirst(RemoteScorer<T>),
}

impl Scorer<HttpTransport> {
    /// Builds the scorer described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InvalidUrl`] or [`ScoringError::Http`] if the
    /// remote transport cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScoringError> {
        if !config.remote_enabled {
            return Ok(Scorer::Local);
        }
        let transport = HttpTransport::new(&config.remote_url, &config.user_agent)?;
        Ok(Scorer::RemoteFirst(RemoteScorer::with_budget(
            transport,
            Duration::from_millis(config.remote_timeout_ms),
        )))
    }
}

impl<T: RemoteTransport> Scorer<T> {
    pub async fn score(&self, signals: &ProductSignals) -> ScoreResult {
        match self {
            Scorer::Local => score_local(signals),
            Scorer::RemoteFirst(remote) => remote.score(signals).await,
        }
    }
}

/// Runs one scan and records it in `session`.
///
/// Returns the result when it became the session's current result, or `None`
/// when a newer scan finished first.
pub async fn scan<T: RemoteTransport>(
    scorer: &Scorer<T>,
    session: &ScanSession,
    signals: &ProductSignals,
) -> Option<ScoreResult> {
    let ticket = session.begin();
    tracing::debug!(generation = ticket.generation(), url = %signals.url, "scan started");

    let result = scorer.score(signals).await;
    session.complete(ticket, result.clone()).then_some(result)
}
