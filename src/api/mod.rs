//! HTTP surface: routes, handlers and the server loop.

pub mod handlers;
pub mod server;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::aggregator::Aggregator;

pub use server::serve;

pub type AppState = Arc<Aggregator>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/analytics", get(handlers::analytics))
        .route("/api/chess", get(handlers::chess))
        .route("/api/spotify/now-playing", get(handlers::now_playing))
        .route("/healthz", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
