//! HTTP API route definitions.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{api_status, health, metrics, openapi, root, AppState};
use crate::metrics as service_metrics;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        // Health endpoint
        .route("/health", get(health))
        // Info endpoints
        .route("/", get(root))
        .route("/api/status", get(api_status))
        .route("/api-docs/openapi.json", get(openapi));

    if state.metrics.is_some() {
        router = router.route("/metrics", get(metrics));
    }

    router
        .route_layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Record count and latency of every routed request.
///
/// Installed with `route_layer`, so the matched route is always known.
async fn track_requests(matched: MatchedPath, req: Request, next: Next) -> Response {
    let start = Instant::now();
    let response = next.run(req).await;

    service_metrics::record_http_latency(start, matched.as_str());
    service_metrics::inc_http_requests(matched.as_str(), response.status().as_u16());
    response
}
