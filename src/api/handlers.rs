//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::config::Config;
use crate::process::{MemoryUsage, Uptime};
use crate::utils::now_iso;

/// Message returned by the root endpoint.
pub const ROOT_MESSAGE: &str = "AWS CodePipeline Sample Application";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Configuration captured at startup.
    pub config: Arc<Config>,
    /// Clock started at boot.
    pub uptime: Uptime,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state; uptime starts counting now.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            uptime: Uptime::start(),
            metrics: None,
        }
    }

    /// Use a clock started elsewhere, typically at the top of `main`.
    pub fn with_uptime(mut self, uptime: Uptime) -> Self {
        self.uptime = uptime;
        self
    }

    /// Attach a Prometheus handle so `/metrics` is served.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    /// Always "healthy".
    pub status: String,
    /// ISO-8601 time of the response.
    pub timestamp: String,
    /// Service version.
    pub version: String,
}

/// Root endpoint response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RootInfo {
    /// Service banner.
    pub message: String,
    /// Environment name.
    pub environment: String,
}

/// Status endpoint response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiStatus {
    /// Always "running".
    pub api: String,
    /// Seconds since the service started.
    pub uptime: f64,
    /// Current memory usage.
    pub memory: MemoryUsage,
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy", body = HealthStatus))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: now_iso(),
        version: state.config.version.clone(),
    })
}

/// Root handler - service banner and environment name.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service information", body = RootInfo))
)]
pub async fn root(State(state): State<AppState>) -> Json<RootInfo> {
    Json(RootInfo {
        message: ROOT_MESSAGE.to_string(),
        environment: state.config.environment.clone(),
    })
}

/// Status handler - uptime and memory of the running process.
#[utoipa::path(
    get,
    path = "/api/status",
    responses((status = 200, description = "Process status", body = ApiStatus))
)]
pub async fn api_status(State(state): State<AppState>) -> Json<ApiStatus> {
    Json(ApiStatus {
        api: "running".to_string(),
        uptime: state.uptime.seconds(),
        memory: MemoryUsage::snapshot(),
    })
}

/// Prometheus exposition handler.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// OpenAPI document for the JSON endpoints.
#[derive(OpenApi)]
#[openapi(
    info(title = "pipeline-sample", description = "Sample service for the deployment pipeline"),
    paths(health, root, api_status),
    components(schemas(HealthStatus, RootInfo, ApiStatus, MemoryUsage))
)]
pub struct ApiDoc;

/// OpenAPI document handler.
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
