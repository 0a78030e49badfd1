//! Remote-first scoring with a local fallback.
//!
//! [`RemoteScorer`] sends the listing to an external classifier through a
//! [`RemoteTransport`] and races the exchange against a fixed budget. Whatever
//! goes wrong (transport error, non-2xx status, malformed payload, budget
//! exceeded) is logged and answered with [`score_local`]. No retries: one
//! failed attempt falls back for the rest of that scan.

mod http;
mod payload;

use std::future::Future;
use std::time::Duration;

use guardify_core::{ProductSignals, ScoreResult};
use serde::Serialize;

use crate::error::ScoringError;
use crate::heuristic::score_local;

pub use http::HttpTransport;
pub use payload::parse_remote_payload;

/// Time the remote classifier gets before the heuristic answers instead.
pub const DEFAULT_REMOTE_BUDGET: Duration = Duration::from_millis(2500);

/// Request body sent to the classifier.
///
/// Absent optional signals are sent as `null` rather than omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteScoreRequest<'a> {
    pub url: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub price_text: &'a str,
    pub image_count: Option<u64>,
    pub image_low_res_count: Option<u64>,
    pub image_average_pixels: Option<u64>,
    pub review_count: Option<u64>,
}

impl<'a> From<&'a ProductSignals> for RemoteScoreRequest<'a> {
    fn from(signals: &'a ProductSignals) -> Self {
        Self {
            url: &signals.url,
            title: &signals.title,
            description: &signals.description,
            price_text: &signals.price_text,
            image_count: signals.image_count,
            image_low_res_count: signals.image_low_res_count,
            image_average_pixels: signals.image_average_pixels,
            review_count: signals.review_count,
        }
    }
}

/// Carries one scoring request to a classifier and returns its raw JSON answer.
///
/// Implementations only move bytes; validation happens in
/// [`parse_remote_payload`].
pub trait RemoteTransport {
    fn send(
        &self,
        request: &RemoteScoreRequest<'_>,
    ) -> impl Future<Output = Result<serde_json::Value, ScoringError>> + Send;
}

/// Scores listings through a remote classifier, falling back to the heuristic.
#[derive(Debug)]
pub struct RemoteScorer<T> {
    transport: T,
    budget: Duration,
}

impl<T: RemoteTransport> RemoteScorer<T> {
    /// Creates a scorer with the default 2500 ms budget.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self::with_budget(transport, DEFAULT_REMOTE_BUDGET)
    }

    #[must_use]
    pub fn with_budget(transport: T, budget: Duration) -> Self {
        Self { transport, budget }
    }

    #[must_use]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Makes a single remote attempt without falling back.
    ///
    /// The transport future is raced against the budget; if the timer wins the
    /// in-flight exchange is dropped and its eventual answer is never observed.
    ///
    /// # Errors
    ///
    /// - [`ScoringError::Timeout`] if the budget elapses first.
    /// - Any transport error ([`ScoringError::Http`], [`ScoringError::UnexpectedStatus`],
    ///   [`ScoringError::Deserialize`]).
    /// - [`ScoringError::InvalidPayload`] if the answer fails validation.
    pub async fn try_score(&self, signals: &ProductSignals) -> Result<ScoreResult, ScoringError> {
        let request = RemoteScoreRequest::from(signals);
        let payload = tokio::time::timeout(self.budget, self.transport.send(&request))
            .await
            .map_err(|_| ScoringError::Timeout {
                budget_ms: budget_millis(self.budget),
            })??;
        parse_remote_payload(payload)
    }

    /// Scores a listing remotely, or locally if the remote attempt fails.
    ///
    /// Never fails: the worst outcome is a heuristic-sourced result.
    pub async fn score(&self, signals: &ProductSignals) -> ScoreResult {
        match self.try_score(signals).await {
            Ok(result) => {
                tracing::debug!(
                    url = %signals.url,
                    score = result.score,
                    risk = %result.risk,
                    "remote score accepted"
                );
                result
            }
            Err(e) => {
                tracing::warn!(
                    url = %signals.url,
                    budget_ms = budget_millis(self.budget),
                    error = %e,
                    "remote scoring failed, using local heuristic"
                );
                score_local(signals)
            }
        }
    }
}

fn budget_millis(budget: Duration) -> u64 {
    u64::try_from(budget.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "../remote_test.rs"]
mod tests;
