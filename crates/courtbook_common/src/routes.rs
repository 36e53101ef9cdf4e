// --- File: crates/courtbook_common/src/routes.rs ---

// Route definitions shared across the application.

use axum::{routing::get, Router};

use crate::handlers::health_handler;

/// Creates a router containing shared routes used by every deployment.
///
/// # Returns
/// A router configured with the shared routes.
pub fn routes() -> Router {
    Router::new().route("/health", get(health_handler))
}
