//! Shared data contract and configuration for Guardify.
//!
//! The signal extractor produces [`ProductSignals`]; the scoring engine turns
//! them into a [`ScoreResult`]. Both records live here so the engine, the
//! scoring service, and the CLI agree on one wire shape.

mod app_config;
mod config;
mod score;
mod signals;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use score::{Risk, ScoreResult, ScoreSource, HIGH_RISK_MIN_SCORE, MEDIUM_RISK_MIN_SCORE};
pub use signals::{ExtractedPage, ProductSignals};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown risk tier: {0:?}")]
    UnknownRisk(String),
}
