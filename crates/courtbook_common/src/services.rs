// --- File: crates/courtbook_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! This module provides trait definitions for the external services used by the
//! application. These traits allow for dependency injection and easier testing by
//! decoupling the application logic from specific implementations, in particular
//! from the club's remote reservation API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// A trait for court reservation operations.
///
/// This trait defines the operations performed against the club's reservation
/// system: listing the reservations of a court, creating a reservation, and
/// cancelling one. The club's server remains the single arbiter of conflicts;
/// implementations surface its verdict instead of deciding themselves.
pub trait ReservationService: Send + Sync {
    /// Error type returned by reservation service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// List the reservations of a court within a time range.
    #[allow(clippy::type_complexity)]
    fn list_reservations(
        &self,
        court_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        include_cancelled: bool,
    ) -> BoxFuture<'_, Vec<Reservation>, Self::Error>;

    /// Create a reservation for a court.
    fn create_reservation(
        &self,
        court_id: &str,
        reservation: NewReservation,
    ) -> BoxFuture<'_, ReservationResult, Self::Error>;

    /// Cancel a reservation on a court.
    fn cancel_reservation(
        &self,
        court_id: &str,
        reservation_id: &str,
    ) -> BoxFuture<'_, ReservationResult, Self::Error>;
}

/// A factory for creating service instances.
///
/// This trait provides methods for creating instances of the services the
/// application needs, hiding the concrete implementations from the binary.
pub trait ServiceFactory: Send + Sync {
    /// Get a reservation service instance.
    fn reservation_service(&self) -> Option<Arc<dyn ReservationService<Error = BoxedError>>>;
}

/// Data structures for reservation service operations.
/// A reservation to be created on a court.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReservation {
    /// The start time of the reservation (RFC 3339).
    pub start_time: String,
    /// The end time of the reservation (RFC 3339).
    pub end_time: String,
    /// The member the court is reserved for.
    pub member_name: String,
    /// An optional note attached to the reservation.
    pub note: Option<String>,
}

/// Represents the result of a create or cancel operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationResult {
    /// The ID of the reservation.
    pub reservation_id: Option<String>,
    /// The status of the reservation.
    pub status: String,
}

/// Represents a reservation as reported by the club's system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// The ID of the reservation. The club API sends this as `id`.
    #[serde(alias = "id")]
    pub reservation_id: String,
    /// The court the reservation is on.
    pub court_id: String,
    /// The start time of the reservation (RFC 3339).
    pub start_time: String,
    /// The end time of the reservation (RFC 3339).
    pub end_time: String,
    /// The member the court is reserved for.
    pub member_name: String,
    /// An optional note attached to the reservation.
    pub note: Option<String>,
    /// The status of the reservation ("confirmed" or "cancelled").
    pub status: String,
    /// When the reservation was created. Not every upstream response
    /// carries the audit fields.
    #[serde(default)]
    pub created: String,
    /// When the reservation was last updated.
    #[serde(default)]
    pub updated: String,
}
