use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use guardify_core::{Risk, ScoreSource};
use serde_json::{json, Value};

use super::*;

/// Answers every request with `payload` after `delay`.
struct FixedTransport {
    delay: Duration,
    payload: Value,
    calls: AtomicU32,
}

impl FixedTransport {
    fn new(delay: Duration, payload: Value) -> Self {
        Self {
            delay,
            payload,
            calls: AtomicU32::new(0),
        }
    }
}

impl RemoteTransport for FixedTransport {
    async fn send(&self, _request: &RemoteScoreRequest<'_>) -> Result<Value, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(self.payload.clone())
    }
}

/// Fails every request without touching the network.
struct FailingTransport;

impl RemoteTransport for FailingTransport {
    async fn send(&self, _request: &RemoteScoreRequest<'_>) -> Result<Value, ScoringError> {
        Err(ScoringError::UnexpectedStatus {
            status: 503,
            url: "http://classifier.test/score".to_string(),
        })
    }
}

/// Records the serialized request body.
struct RecordingTransport {
    seen: Mutex<Option<Value>>,
}

impl RemoteTransport for RecordingTransport {
    async fn send(&self, request: &RemoteScoreRequest<'_>) -> Result<Value, ScoringError> {
        let body = serde_json::to_value(request).expect("request serializes");
        *self.seen.lock().expect("lock") = Some(body);
        Ok(json!({"score": 10, "risk": "Low"}))
    }
}

fn sample_signals() -> ProductSignals {
    ProductSignals {
        url: "https://shop.example.com/products/tee".to_string(),
        title: "Best cotton tee".to_string(),
        description: "Soft tee.".to_string(),
        price_text: "$3.00".to_string(),
        image_count: Some(2),
        image_low_res_count: None,
        image_average_pixels: Some(120_000),
        review_count: Some(0),
    }
}

#[tokio::test(start_paused = true)]
async fn slow_transport_falls_back_to_local_heuristic() {
    let transport = FixedTransport::new(
        Duration::from_millis(3_000),
        json!({"score": 5, "risk": "Low"}),
    );
    let scorer = RemoteScorer::new(transport);
    let signals = sample_signals();

    let result = scorer.score(&signals).await;

    assert_eq!(result.source, ScoreSource::Heuristic);
    assert_eq!(result, score_local(&signals));
}

#[tokio::test(start_paused = true)]
async fn slow_transport_reports_timeout_from_try_score() {
    let transport = FixedTransport::new(
        Duration::from_millis(2_501),
        json!({"score": 5, "risk": "Low"}),
    );
    let scorer = RemoteScorer::new(transport);

    let err = scorer.try_score(&sample_signals()).await.unwrap_err();

    assert!(
        matches!(err, ScoringError::Timeout { budget_ms: 2500 }),
        "expected Timeout, got: {err:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn answer_within_budget_is_tagged_remote() {
    let transport = FixedTransport::new(
        Duration::from_millis(2_400),
        json!({"score": 42, "risk": "Medium"}),
    );
    let scorer = RemoteScorer::new(transport);

    let result = scorer.score(&sample_signals()).await;

    assert_eq!(
        result,
        ScoreResult {
            score: 42,
            risk: Risk::Medium,
            flags: vec![],
            source: ScoreSource::Remote,
        }
    );
}

#[tokio::test(start_paused = true)]
async fn remote_is_attempted_exactly_once() {
    let transport = FixedTransport::new(
        Duration::from_millis(5_000),
        json!({"score": 42, "risk": "Medium"}),
    );
    let scorer = RemoteScorer::new(transport);

    let _ = scorer.score(&sample_signals()).await;

    assert_eq!(scorer.transport.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn transport_error_falls_back() {
    let scorer = RemoteScorer::new(FailingTransport);
    let signals = sample_signals();

    assert_eq!(scorer.score(&signals).await, score_local(&signals));
}

#[tokio::test]
async fn invalid_payload_falls_back() {
    let transport = FixedTransport::new(Duration::ZERO, json!({"score": 42}));
    let scorer = RemoteScorer::new(transport);
    let signals = sample_signals();

    let result = scorer.score(&signals).await;

    assert_eq!(result.source, ScoreSource::Heuristic);
    assert_eq!(result, score_local(&signals));
}

#[tokio::test]
async fn remote_score_is_clamped() {
    let transport = FixedTransport::new(Duration::ZERO, json!({"score": 250, "risk": "High"}));
    let scorer = RemoteScorer::new(transport);

    let result = scorer.score(&sample_signals()).await;

    assert_eq!(result.score, 100);
    assert_eq!(result.source, ScoreSource::Remote);
}

#[tokio::test(start_paused = true)]
async fn custom_budget_is_respected() {
    let transport = FixedTransport::new(
        Duration::from_millis(600),
        json!({"score": 42, "risk": "Medium"}),
    );
    let scorer = RemoteScorer::with_budget(transport, Duration::from_millis(500));
    assert_eq!(scorer.budget(), Duration::from_millis(500));

    let result = scorer.score(&sample_signals()).await;

    assert_eq!(result.source, ScoreSource::Heuristic);
}

#[tokio::test]
async fn request_carries_all_scoring_fields() {
    let transport = RecordingTransport {
        seen: Mutex::new(None),
    };
    let scorer = RemoteScorer::new(transport);

    scorer.score(&sample_signals()).await;

    let body = scorer
        .transport
        .seen
        .lock()
        .expect("lock")
        .clone()
        .expect("request recorded");
    assert_eq!(
        body,
        json!({
            "url": "https://shop.example.com/products/tee",
            "title": "Best cotton tee",
            "description": "Soft tee.",
            "priceText": "$3.00",
            "imageCount": 2,
            "imageLowResCount": null,
            "imageAveragePixels": 120000,
            "reviewCount": 0
        })
    );
}

#[test]
fn default_budget_is_2500_ms() {
    assert_eq!(DEFAULT_REMOTE_BUDGET, Duration::from_millis(2500));
    assert_eq!(budget_millis(DEFAULT_REMOTE_BUDGET), 2500);
}
