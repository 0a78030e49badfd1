//! HTTP surface of the scoring service.
//!
//! `POST /score` answers in the classifier wire format
//! (`{ score, risk, flags }`) using the local heuristic, so remote-first
//! clients can be pointed at this service.

use axum::{
    http::{header, HeaderName, Method},
    routing::{get, post},
    Extension, Json, Router,
};
use guardify_core::{ProductSignals, Risk};
use guardify_scoring::score_local;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

/// Body returned by `POST /score`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ScoreResponse {
    pub score: u8,
    pub risk: Risk,
    pub flags: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    version: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/score", post(score))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http()),
        )
}

async fn health() -> Json<HealthData> {
    Json(HealthData {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn score(
    Extension(req_id): Extension<RequestId>,
    Json(signals): Json<ProductSignals>,
) -> Json<ScoreResponse> {
    let result = score_local(&signals);
    tracing::info!(
        request_id = %req_id.0,
        url = %signals.url,
        score = result.score,
        risk = %result.risk,
        flags = result.flags.len(),
        "scored listing"
    );
    Json(ScoreResponse {
        score: result.score,
        risk: result.risk,
        flags: result.flags,
    })
}
