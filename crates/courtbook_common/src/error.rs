// --- File: crates/courtbook_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all courtbook errors.
///
/// This enum provides a common set of error variants that can be used across all crates.
/// Each crate can extend this by implementing From<SpecificError> for CourtbookError.
#[derive(Error, Debug)]
pub enum CourtbookError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a conflict (e.g., the slot is already taken)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to rate limiting
    #[error("Rate limited: {0}")]
    RateLimitError(String),

    /// Error occurred because a feature is disabled in the configuration
    #[error("Service disabled: {0}")]
    ServiceDisabledError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for CourtbookError {
    fn status_code(&self) -> u16 {
        match self {
            CourtbookError::HttpError(_) => 500,
            CourtbookError::ParseError(_) => 400,
            CourtbookError::ConfigError(_) => 500,
            CourtbookError::ValidationError(_) => 400,
            CourtbookError::ExternalServiceError { .. } => 502,
            CourtbookError::ConflictError(_) => 409,
            CourtbookError::NotFoundError(_) => 404,
            CourtbookError::TimeoutError(_) => 504,
            CourtbookError::RateLimitError(_) => 429,
            CourtbookError::ServiceDisabledError(_) => 503,
            CourtbookError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
///
/// This trait can be implemented by error types to provide a consistent way
/// to add context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, CourtbookError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, CourtbookError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, CourtbookError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| CourtbookError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, CourtbookError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| CourtbookError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for CourtbookError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CourtbookError::TimeoutError(err.to_string())
        } else {
            CourtbookError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CourtbookError {
    fn from(err: serde_json::Error) -> Self {
        CourtbookError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for CourtbookError {
    fn from(err: std::io::Error) -> Self {
        CourtbookError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> CourtbookError {
    CourtbookError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> CourtbookError {
    CourtbookError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> CourtbookError {
    CourtbookError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> CourtbookError {
    CourtbookError::ConflictError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> CourtbookError {
    CourtbookError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn service_disabled<T: fmt::Display>(message: T) -> CourtbookError {
    CourtbookError::ServiceDisabledError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> CourtbookError {
    CourtbookError::InternalError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_variants() {
        assert_eq!(validation_error("bad start").status_code(), 400);
        assert_eq!(conflict("slot taken").status_code(), 409);
        assert_eq!(not_found("reservation").status_code(), 404);
        assert_eq!(service_disabled("booking").status_code(), 503);
        assert_eq!(external_service_error("club_api", "boom").status_code(), 502);
        assert_eq!(config_error("missing section").status_code(), 500);
        assert_eq!(internal_error("oops").status_code(), 500);
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let io_err: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk on fire",
        ));
        let err = io_err.context("reading schedule").unwrap_err();
        match err {
            CourtbookError::InternalError(msg) => {
                assert!(msg.contains("reading schedule"), "context prefix missing: {msg}");
                assert!(msg.contains("disk on fire"), "source message missing: {msg}");
            }
            other => panic!("expected InternalError, got {other:?}"),
        }
    }

    #[test]
    fn with_context_is_lazy() {
        let mut called = false;
        let ok: Result<u8, std::io::Error> = Ok(7);
        let value = ok.with_context(|| {
            called = true;
            "never evaluated"
        });
        assert_eq!(value.unwrap(), 7);
        assert!(!called, "context closure should not run for Ok results");
    }

    #[test]
    fn serde_errors_map_to_parse_error() {
        let err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let converted: CourtbookError = err.into();
        assert_eq!(converted.status_code(), 400);
    }
}
