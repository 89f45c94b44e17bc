//! HTTP API module for health, info, status, and metrics endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::{ApiDoc, AppState};
pub use routes::create_router;
