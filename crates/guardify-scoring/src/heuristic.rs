//! Local, deterministic listing scorer.

use guardify_core::{ProductSignals, Risk, ScoreResult, ScoreSource};

use crate::rules::{Rule, RuleContext, RULES};

/// Upper bound of every score.
pub const MAX_SCORE: u8 = 100;

/// Scores a listing with the built-in rule table.
///
/// Pure: the same signals always produce the same result, flag order included.
#[must_use]
pub fn score_local(signals: &ProductSignals) -> ScoreResult {
    score_with_rules(signals, RULES)
}

/// Scores a listing against an arbitrary rule table, summing the points of
/// every rule that applies and clamping the total to `[0, 100]`.
#[must_use]
pub fn score_with_rules(signals: &ProductSignals, rules: &[Rule]) -> ScoreResult {
    let ctx = RuleContext::new(signals);
    let mut total = 0u32;
    let mut flags = Vec::new();

    for rule in rules {
        if (rule.applies)(&ctx) {
            total = total.saturating_add(rule.points);
            flags.push(rule.flag.to_string());
        }
    }

    let score = u8::try_from(total.min(u32::from(MAX_SCORE))).unwrap_or(MAX_SCORE);

    ScoreResult {
        score,
        risk: Risk::from_score(score),
        flags,
        source: ScoreSource::Heuristic,
    }
}

#[cfg(test)]
#[path = "heuristic_test.rs"]
mod tests;
