// --- File: crates/courtbook_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod features; // Feature flag handling
pub mod handlers; // Shared HTTP handlers
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod routes; // Shared route definitions
pub mod services; // Service abstractions

// Re-export the shared routes for the main backend service
pub use routes::routes;

// Re-export error types and utilities for easier access
pub use error::{
    conflict, config_error, external_service_error, internal_error, not_found, service_disabled,
    validation_error, Context, CourtbookError, HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, HTTP_CLIENT},
    IntoHttpResponse,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};

// Re-export feature flag handling utilities for easier access
pub use features::is_feature_enabled;

#[cfg(feature = "booking")]
pub use features::is_booking_enabled;
