//! Sample web service deployed by the CodePipeline demo.
//!
//! Serves three read-only JSON endpoints and starts a profiling agent on boot:
//!
//! ```text
//! GET /            -> { message, environment }
//! GET /health      -> { status, timestamp, version }
//! GET /api/status  -> { api, uptime, memory }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`profiler`]: Profiling agent seam
//! - [`process`]: Uptime and memory introspection
//! - [`metrics`]: Prometheus request metrics
//! - [`api`]: HTTP handlers and router
//! - [`server`]: Startup sequence and serving
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod process;
pub mod profiler;
pub mod server;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
