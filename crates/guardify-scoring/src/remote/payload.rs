//! Validation of classifier answers.

use guardify_core::{Risk, ScoreResult, ScoreSource};
use serde_json::Value;

use crate::error::ScoringError;

/// Turns a classifier's JSON answer into a remote-sourced [`ScoreResult`].
///
/// `score` must be a JSON number; it is clamped to `[0, 100]` and rounded.
/// `risk` must be a non-empty tier name (any case). `flags` is kept only when
/// it is an array of strings and is otherwise replaced by an empty list.
///
/// # Errors
///
/// Returns [`ScoringError::InvalidPayload`] if the answer is not an object,
/// lacks a numeric `score`, or lacks a recognisable `risk`.
pub fn parse_remote_payload(payload: Value) -> Result<ScoreResult, ScoringError> {
    let Value::Object(mut fields) = payload else {
        return Err(ScoringError::InvalidPayload(
            "expected a JSON object".to_string(),
        ));
    };

    let raw_score = fields
        .get("score")
        .and_then(Value::as_f64)
        .ok_or_else(|| ScoringError::InvalidPayload("missing numeric score".to_string()))?;

    let risk = match fields.get("risk").and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => text
            .parse::<Risk>()
            .map_err(|e| ScoringError::InvalidPayload(e.to_string()))?,
        _ => {
            return Err(ScoringError::InvalidPayload(
                "missing risk tier".to_string(),
            ))
        }
    };

    let flags = match fields.remove("flags") {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(flag) => Some(flag),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    Ok(ScoreResult {
        score: clamp_score(raw_score),
        risk,
        flags,
        source: ScoreSource::Remote,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_score(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0).round() as u8
}
