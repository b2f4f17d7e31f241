use axum::Json;
use axum::extract::State;
use axum::http::header::{self, HeaderName};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::api::AppState;

/// Cache-Control for live data: nothing may store it, anywhere.
pub const LIVE_CACHE_CONTROL: &str = "private, no-cache, no-store, max-age=0, must-revalidate";

fn live_headers() -> [(HeaderName, &'static str); 4] {
    [
        (header::CACHE_CONTROL, LIVE_CACHE_CONTROL),
        (header::PRAGMA, "no-cache"),
        (header::EXPIRES, "0"),
        (HeaderName::from_static("cdn-cache-control"), "no-store"),
    ]
}

/// `GET /api/spotify/now-playing`. Always 200.
pub async fn now_playing(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.now_playing().await;
    (live_headers(), Json(body))
}

/// `GET /api/chess`. The one endpoint allowed to answer 500, and only when
/// no rating has ever been fetched.
pub async fn chess(State(state): State<AppState>) -> Response {
    match state.rating().await {
        Ok(outcome) => (
            [(
                header::CACHE_CONTROL,
                format!("public, max-age={}", outcome.max_age_secs),
            )],
            Json(outcome.snapshot),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "failed to fetch chess stats" })),
        )
            .into_response(),
    }
}

/// `GET /api/analytics`. Every hit increments the counter, so never cache.
pub async fn analytics(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.views().await;
    ([(header::CACHE_CONTROL, "no-store")], Json(body))
}

pub async fn health() -> &'static str {
    "ok"
}
