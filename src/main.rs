//! Sample pipeline web service entry point.

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pipeline_sample::config::Config;
use pipeline_sample::metrics;
use pipeline_sample::process::Uptime;
use pipeline_sample::profiler::NoopProfiler;
use pipeline_sample::server;

/// Sample web service for the deployment pipeline.
#[derive(Parser, Debug)]
#[command(name = "pipeline-sample")]
#[command(about = "Sample web service exposing health, info, and status endpoints")]
#[command(version)]
struct Args {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let uptime = Uptime::start();

    // Parse CLI arguments
    let _args = Args::parse();

    // Load configuration
    let config = Config::load();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.as_ref().map(|c| c.rust_log.as_str()).unwrap_or("info");
        EnvFilter::new(level)
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = config.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Initialize metrics
    let handle = match metrics::install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Metrics disabled: {}", e);
            None
        }
    };

    server::run(config, uptime, &NoopProfiler, handle).await.map_err(|e| {
        error!("Server failed: {}", e);
        e
    })?;

    info!("Server stopped");
    Ok(())
}
