//! Plain-text rendering of scan results.

use guardify_core::{ProductSignals, ScoreResult};
use guardify_scoring::Rule;

/// Price text longer than this many characters is truncated for display.
const PRICE_DISPLAY_CHARS: usize = 16;

const NOT_FOUND: &str = "Not found";

/// Shortens raw price text for display, or reports it missing.
pub(crate) fn format_price(price_text: &str) -> String {
    if price_text.is_empty() {
        return NOT_FOUND.to_string();
    }
    if price_text.chars().count() > PRICE_DISPLAY_CHARS {
        let head: String = price_text.chars().take(PRICE_DISPLAY_CHARS).collect();
        return format!("{head}\u{2026}");
    }
    price_text.to_string()
}

fn format_count(count: Option<u64>) -> String {
    count.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

pub(crate) fn render_report(signals: &ProductSignals, result: &ScoreResult) -> String {
    let title = if signals.title.trim().is_empty() {
        NOT_FOUND
    } else {
        signals.title.trim()
    };

    let mut lines = vec![
        format!("Score: {} ({} Risk)", result.score, result.risk),
        format!("Source: {}", result.source),
        String::new(),
        format!("Title: {title}"),
        format!("Price: {}", format_price(&signals.price_text)),
        format!("Images: {}", format_count(signals.image_count)),
        format!(
            "Low-res images: {}",
            signals.image_low_res_count.unwrap_or(0)
        ),
        format!("Reviews: {}", format_count(signals.review_count)),
        String::new(),
        "Signals:".to_string(),
    ];

    if result.flags.is_empty() {
        lines.push("  No major signals detected.".to_string());
    } else {
        lines.extend(result.flags.iter().map(|flag| format!("  - {flag}")));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub(crate) fn render_rules(rules: &[Rule]) -> String {
    rules
        .iter()
        .map(|rule| format!("+{:>2}  {}\n", rule.points, rule.flag))
        .collect()
}
