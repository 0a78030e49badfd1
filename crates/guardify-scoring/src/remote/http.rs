//! `reqwest`-backed transport for the remote classifier.

use std::time::Duration;

use reqwest::{Client, Url};

use super::{RemoteScoreRequest, RemoteTransport};
use crate::error::ScoringError;

/// POSTs scoring requests as JSON to a fixed classifier URL.
///
/// The client sets no overall request timeout; the scorer's budget race bounds
/// each exchange.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: Url,
}

impl HttpTransport {
    /// Creates a transport for the classifier at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InvalidUrl`] if `url` does not parse, or
    /// [`ScoringError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed.
    pub fn new(url: &str, user_agent: &str) -> Result<Self, ScoringError> {
        let parsed = Url::parse(url).map_err(|e| ScoringError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            url: parsed,
        })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl RemoteTransport for HttpTransport {
    async fn send(
        &self,
        request: &RemoteScoreRequest<'_>,
    ) -> Result<serde_json::Value, ScoringError> {
        let response = self
            .client
            .post(self.url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoringError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ScoringError::Deserialize {
            context: format!("score response from {}", self.url),
            source: e,
        })
    }
}
