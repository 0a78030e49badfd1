//! Text primitives shared by the scoring rules.

use std::collections::HashSet;

/// Splits text into lowercase ASCII alphanumeric tokens.
///
/// Every character outside `[a-z0-9]` and whitespace becomes a separator, so
/// punctuation and non-ASCII letters never appear inside a token. Order and
/// duplicates are preserved.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    normalized.split_whitespace().map(str::to_owned).collect()
}

/// Share of distinct tokens among all tokens.
///
/// Returns `1.0` for an empty sequence. Low values mean repeated filler text.
#[must_use]
pub fn unique_ratio(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 1.0;
    }
    let distinct: HashSet<&str> = tokens.iter().map(String::as_str).collect();

    #[allow(clippy::cast_precision_loss)]
    let ratio = distinct.len() as f64 / tokens.len() as f64;
    ratio
}

/// Extracts a number from raw price text by keeping only digits and `.`.
///
/// No currency or locale handling: `"€4,99"` reads as `499`. Returns `None`
/// when nothing numeric remains or the remainder is not a finite number
/// (e.g. `"1.2.3"`).
#[must_use]
pub fn parse_price(price_text: &str) -> Option<f64> {
    let numeric: String = price_text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if numeric.is_empty() {
        return None;
    }

    numeric.parse::<f64>().ok().filter(|value| value.is_finite())
}
