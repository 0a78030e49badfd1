use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Lowest score that lands in [`Risk::High`].
pub const HIGH_RISK_MIN_SCORE: u8 = 55;

/// Lowest score that lands in [`Risk::Medium`].
pub const MEDIUM_RISK_MIN_SCORE: u8 = 25;

/// Coarse risk tier derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Risk {
    Low,
    Medium,
    High,
}

impl Risk {
    /// Maps a score to its tier. Each band includes its lower bound.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_RISK_MIN_SCORE {
            Risk::High
        } else if score >= MEDIUM_RISK_MIN_SCORE {
            Risk::Medium
        } else {
            Risk::Low
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Risk::Low => "Low",
            Risk::Medium => "Medium",
            Risk::High => "High",
        }
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Risk {
    type Err = CoreError;

    /// Parses a tier name case-insensitively, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Risk::Low),
            "medium" => Ok(Risk::Medium),
            "high" => Ok(Risk::High),
            _ => Err(CoreError::UnknownRisk(s.to_string())),
        }
    }
}

/// Where a [`ScoreResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    Heuristic,
    Remote,
}

impl fmt::Display for ScoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreSource::Heuristic => f.write_str("heuristic"),
            ScoreSource::Remote => f.write_str("remote"),
        }
    }
}

/// Outcome of scoring one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Always within `[0, 100]`.
    pub score: u8,
    pub risk: Risk,
    /// Human-readable reasons, in rule evaluation order.
    pub flags: Vec<String>,
    pub source: ScoreSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_inclusive_on_lower_bound() {
        assert_eq!(Risk::from_score(0), Risk::Low);
        assert_eq!(Risk::from_score(24), Risk::Low);
        assert_eq!(Risk::from_score(25), Risk::Medium);
        assert_eq!(Risk::from_score(54), Risk::Medium);
        assert_eq!(Risk::from_score(55), Risk::High);
        assert_eq!(Risk::from_score(100), Risk::High);
    }

    #[test]
    fn risk_parses_case_insensitively() {
        assert_eq!("Medium".parse::<Risk>(), Ok(Risk::Medium));
        assert_eq!(" HIGH ".parse::<Risk>(), Ok(Risk::High));
        assert_eq!("low".parse::<Risk>(), Ok(Risk::Low));
    }

    #[test]
    fn unknown_risk_is_rejected() {
        assert_eq!(
            "Critical".parse::<Risk>(),
            Err(CoreError::UnknownRisk("Critical".to_string()))
        );
        assert!("".parse::<Risk>().is_err());
    }

    #[test]
    fn score_result_serializes_with_lowercase_source() {
        let result = ScoreResult {
            score: 42,
            risk: Risk::Medium,
            flags: vec![],
            source: ScoreSource::Remote,
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"score": 42, "risk": "Medium", "flags": [], "source": "remote"})
        );
    }
}
