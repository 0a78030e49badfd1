use serde::{Deserialize, Serialize};

/// Observations the extractor collected from one product page.
///
/// Every field tolerates absence: strings default to empty and counts to
/// `None`. A missing optional signal is never treated as evidence of low
/// quality. Counts are unsigned, so negative sentinels cannot be expressed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSignals {
    pub url: String,
    pub title: String,
    pub description: String,
    /// Raw price text as shown on the page, in whatever format the store uses.
    pub price_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_low_res_count: Option<u64>,
    /// Mean `width * height` over sized images. `Some(0)` means no samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_average_pixels: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u64>,
}

/// Envelope the content script answers a scan request with.
///
/// Non-product pages carry only the URL, so the signals are flattened in and
/// default when missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedPage {
    #[serde(default = "default_is_product_page")]
    pub is_product_page: bool,
    #[serde(flatten)]
    pub signals: ProductSignals,
}

fn default_is_product_page() -> bool {
    true
}

impl ExtractedPage {
    /// Returns the signals when the page was recognised as a product page.
    #[must_use]
    pub fn into_signals(self) -> Option<ProductSignals> {
        self.is_product_page.then_some(self.signals)
    }
}
