use thiserror::Error;

/// Failures of a remote scoring attempt.
///
/// None of these reach the caller of [`RemoteScorer::score`](crate::RemoteScorer::score);
/// they are logged and answered with the local heuristic instead.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid remote payload: {0}")]
    InvalidPayload(String),

    #[error("remote scoring did not finish within {budget_ms}ms")]
    Timeout { budget_ms: u64 },

    #[error("invalid remote URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
