//! The heuristic rule table.
//!
//! Rules are evaluated in table order. Every rule that applies adds its points
//! and contributes its flag exactly once, so the flag order of a result is the
//! order of this table.

use std::sync::LazyLock;

use guardify_core::ProductSignals;
use regex::Regex;

use crate::text::{parse_price, tokenize, unique_ratio};

/// Descriptions shorter than this many UTF-16 code units are flagged as thin.
pub const SHORT_DESCRIPTION_CHARS: usize = 80;
/// Descriptions longer than this many UTF-16 code units are flagged as padded.
pub const LONG_DESCRIPTION_CHARS: usize = 1500;
/// Token uniqueness below this ratio marks a description as repetitive.
pub const REPETITIVE_RATIO: f64 = 0.45;
/// Prices strictly below this value are suspicious.
pub const LOW_PRICE: f64 = 5.0;
/// Listings with fewer images than this are flagged.
pub const MIN_IMAGE_COUNT: u64 = 3;
/// This many low-resolution images or more are flagged.
pub const LOW_RES_IMAGE_LIMIT: u64 = 2;
/// Average image area (pixels) below which resolution is flagged.
pub const LOW_AVERAGE_PIXELS: u64 = 250_000;

static GENERIC_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(best|premium|high\s*quality|amazing|new|hot|sale|top\s*rated)")
        .expect("valid generic title regex")
});

/// Precomputed view of one listing, shared by every rule.
#[derive(Debug)]
pub struct RuleContext<'a> {
    pub signals: &'a ProductSignals,
    /// Title with surrounding whitespace removed.
    pub title: &'a str,
    /// Description with surrounding whitespace removed.
    pub description: &'a str,
    /// Length of the trimmed description in UTF-16 code units, as browsers
    /// measure page text.
    pub description_units: usize,
    pub description_unique_ratio: f64,
    pub price: Option<f64>,
}

impl<'a> RuleContext<'a> {
    #[must_use]
    pub fn new(signals: &'a ProductSignals) -> Self {
        let title = trim_page_text(&signals.title);
        let description = trim_page_text(&signals.description);
        Self {
            signals,
            title,
            description,
            description_units: description.encode_utf16().count(),
            description_unique_ratio: unique_ratio(&tokenize(description)),
            price: parse_price(&signals.price_text),
        }
    }

    fn has_description(&self) -> bool {
        !self.description.is_empty()
    }
}

/// Strips whitespace and byte-order marks the way page scripts trim text.
fn trim_page_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// One weighted check over a listing.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub flag: &'static str,
    pub points: u32,
    pub applies: fn(&RuleContext<'_>) -> bool,
}

pub const RULES: &[Rule] = &[
    Rule {
        flag: "Missing or empty title",
        points: 20,
        applies: missing_title,
    },
    Rule {
        flag: "Missing product description",
        points: 25,
        applies: missing_description,
    },
    Rule {
        flag: "Very short description",
        points: 20,
        applies: short_description,
    },
    Rule {
        flag: "Overly long description",
        points: 10,
        applies: long_description,
    },
    Rule {
        flag: "Highly repetitive description",
        points: 15,
        applies: repetitive_description,
    },
    Rule {
        flag: "Generic marketing title terms",
        points: 10,
        applies: generic_title,
    },
    Rule {
        flag: "Unusually low price",
        points: 15,
        applies: low_price,
    },
    Rule {
        flag: "Low product image count",
        points: 15,
        applies: few_images,
    },
    Rule {
        flag: "Multiple low-resolution images",
        points: 15,
        applies: low_res_images,
    },
    Rule {
        flag: "Low average image resolution",
        points: 10,
        applies: low_average_resolution,
    },
    Rule {
        flag: "No visible reviews",
        points: 10,
        applies: no_reviews,
    },
];

fn missing_title(ctx: &RuleContext<'_>) -> bool {
    ctx.title.is_empty()
}

fn missing_description(ctx: &RuleContext<'_>) -> bool {
    !ctx.has_description()
}

// Length and repetition checks only look at descriptions that exist; an empty
// one is already covered by `missing_description`.
fn short_description(ctx: &RuleContext<'_>) -> bool {
    ctx.has_description() && ctx.description_units < SHORT_DESCRIPTION_CHARS
}

fn long_description(ctx: &RuleContext<'_>) -> bool {
    ctx.has_description() && ctx.description_units > LONG_DESCRIPTION_CHARS
}

fn repetitive_description(ctx: &RuleContext<'_>) -> bool {
    ctx.has_description() && ctx.description_unique_ratio < REPETITIVE_RATIO
}

fn generic_title(ctx: &RuleContext<'_>) -> bool {
    !ctx.title.is_empty() && GENERIC_TITLE.is_match(ctx.title)
}

fn low_price(ctx: &RuleContext<'_>) -> bool {
    ctx.price.is_some_and(|price| price < LOW_PRICE)
}

fn few_images(ctx: &RuleContext<'_>) -> bool {
    ctx.signals
        .image_count
        .is_some_and(|count| count < MIN_IMAGE_COUNT)
}

fn low_res_images(ctx: &RuleContext<'_>) -> bool {
    ctx.signals
        .image_low_res_count
        .is_some_and(|count| count >= LOW_RES_IMAGE_LIMIT)
}

// `Some(0)` means the extractor had no sized images to average.
fn low_average_resolution(ctx: &RuleContext<'_>) -> bool {
    ctx.signals
        .image_average_pixels
        .is_some_and(|pixels| pixels > 0 && pixels < LOW_AVERAGE_PIXELS)
}

fn no_reviews(ctx: &RuleContext<'_>) -> bool {
    ctx.signals.review_count == Some(0)
}
