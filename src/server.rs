//! Server lifecycle: profiler start, bind, announce, serve.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::process::Uptime;
use crate::profiler::{start_agent, ProfilerSettings, ProfilingAgent};
use crate::utils::shutdown_signal;

/// Bind the HTTP listener on all interfaces.
pub async fn bind(port: u16) -> Result<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServiceError::Bind { addr, source })
}

/// Serve the API on an already bound listener until shutdown is signalled.
pub async fn serve_on(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServiceError::Serve)
}

/// Run the full startup sequence and serve until shutdown.
///
/// `uptime` should be started as early as possible in the process.
#[instrument(skip_all, fields(port = config.port))]
pub async fn run(
    config: Config,
    uptime: Uptime,
    profiler: &dyn ProfilingAgent,
    metrics: Option<PrometheusHandle>,
) -> Result<()> {
    start_agent(profiler, &ProfilerSettings::default());

    let listener = bind(config.port).await?;
    let port = listener
        .local_addr()
        .map(|addr| addr.port())
        .unwrap_or(config.port);

    info!("Server running on port {}", port);
    info!("Environment: {}", config.environment);

    let mut state = AppState::new(config).with_uptime(uptime);
    if let Some(handle) = metrics {
        state = state.with_metrics(handle);
    }

    serve_on(listener, state).await
}
