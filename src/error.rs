//! Unified error types for the sample service.

use std::net::SocketAddr;

use thiserror::Error;

/// Unified error type for the sample service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that was requested.
        addr: SocketAddr,
        /// Underlying socket error.
        source: std::io::Error,
    },

    /// The HTTP server stopped with an error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Profiling agent errors, logged by `profiler::start_agent` and never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfilerError {
    /// A required setting was empty.
    #[error("missing profiler setting: {0}")]
    MissingSetting(&'static str),

    /// The agent refused to start.
    #[error("agent {agent} failed to start: {reason}")]
    StartFailed {
        /// Agent name.
        agent: String,
        /// Reason for failure.
        reason: String,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
