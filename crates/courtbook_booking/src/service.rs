// --- File: crates/courtbook_booking/src/service.rs ---
//! Club reservation API client.
//!
//! This module provides the implementation of the ReservationService trait
//! for the club's remote reservation API. The club's server is the single
//! arbiter of double bookings; this client only surfaces its verdict.

use chrono::{DateTime, Utc};
use courtbook_common::services::{
    BoxFuture, BoxedError, NewReservation, Reservation, ReservationResult, ReservationService,
};
use courtbook_common::HTTP_CLIENT;
use courtbook_config::BookingConfig;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur when talking to the club reservation API.
#[derive(Error, Debug)]
pub enum ClubApiError {
    #[error("Club API request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Failed to parse club API response: {0}")]
    ParseError(String),
    #[error("Reservation conflict")]
    Conflict,
    #[error("Reservation not found: {0}")]
    NotFound(String),
    #[error("Club API error: status {status}, body: {body}")]
    ApiError { status: u16, body: String },
}

#[derive(Deserialize, Debug)]
struct ListReservationsResponse {
    reservations: Vec<Reservation>,
}

/// Club reservation API implementation of [`ReservationService`].
pub struct ClubApiService {
    base_url: String,
    client: Client,
}

impl ClubApiService {
    /// Create a client against the configured API base URL, reusing the
    /// shared HTTP client (and its 30 s timeout).
    pub fn new(config: &BookingConfig) -> Self {
        Self::with_client(config, HTTP_CLIENT.clone())
    }

    /// Create a client with a custom `reqwest::Client`.
    pub fn with_client(config: &BookingConfig, client: Client) -> Self {
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn reservations_url(&self, court_id: &str) -> String {
        format!("{}/courts/{}/reservations", self.base_url, court_id)
    }
}

impl ReservationService for ClubApiService {
    type Error = ClubApiError;

    fn list_reservations(
        &self,
        court_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        include_cancelled: bool,
    ) -> BoxFuture<'_, Vec<Reservation>, Self::Error> {
        let url = self.reservations_url(court_id);
        let client = self.client.clone();

        Box::pin(async move {
            debug!(%url, %from, %to, include_cancelled, "listing reservations");
            let mut request = client
                .get(&url)
                .query(&[("from", from.to_rfc3339()), ("to", to.to_rfc3339())]);
            if include_cancelled {
                request = request.query(&[("include_cancelled", "true")]);
            }

            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                warn!(status = status.as_u16(), "club API list failed");
                return Err(ClubApiError::ApiError {
                    status: status.as_u16(),
                    body,
                });
            }

            let parsed: ListReservationsResponse = response
                .json()
                .await
                .map_err(|e| ClubApiError::ParseError(e.to_string()))?;
            Ok(parsed.reservations)
        })
    }

    fn create_reservation(
        &self,
        court_id: &str,
        reservation: NewReservation,
    ) -> BoxFuture<'_, ReservationResult, Self::Error> {
        let url = self.reservations_url(court_id);
        let client = self.client.clone();

        Box::pin(async move {
            debug!(%url, start = %reservation.start_time, "creating reservation");
            let response = client.post(&url).json(&reservation).send().await?;
            let status = response.status();

            if status == StatusCode::CONFLICT {
                return Err(ClubApiError::Conflict);
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                warn!(status = status.as_u16(), "club API create failed");
                return Err(ClubApiError::ApiError {
                    status: status.as_u16(),
                    body,
                });
            }

            let created: Reservation = response
                .json()
                .await
                .map_err(|e| ClubApiError::ParseError(e.to_string()))?;
            Ok(ReservationResult {
                reservation_id: Some(created.reservation_id),
                status: created.status,
            })
        })
    }

    fn cancel_reservation(
        &self,
        court_id: &str,
        reservation_id: &str,
    ) -> BoxFuture<'_, ReservationResult, Self::Error> {
        let url = format!("{}/{}", self.reservations_url(court_id), reservation_id);
        let reservation_id = reservation_id.to_string();
        let client = self.client.clone();

        Box::pin(async move {
            debug!(%url, "cancelling reservation");
            let response = client.delete(&url).send().await?;
            let status = response.status();

            if status == StatusCode::NOT_FOUND {
                return Err(ClubApiError::NotFound(reservation_id));
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                warn!(status = status.as_u16(), "club API cancel failed");
                return Err(ClubApiError::ApiError {
                    status: status.as_u16(),
                    body,
                });
            }

            // Upstream soft-cancels and answers 200 or 204.
            Ok(ReservationResult {
                reservation_id: Some(reservation_id),
                status: "cancelled".to_string(),
            })
        })
    }
}

/// Adapter erasing a concrete service error into [`BoxedError`].
///
/// Handlers and the backend factory share one trait-object type,
/// `Arc<dyn ReservationService<Error = BoxedError>>`, regardless of the
/// concrete implementation behind it.
pub struct BoxedReservationService<S> {
    inner: S,
}

impl<S> BoxedReservationService<S>
where
    S: ReservationService,
{
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S> ReservationService for BoxedReservationService<S>
where
    S: ReservationService,
{
    type Error = BoxedError;

    fn list_reservations(
        &self,
        court_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        include_cancelled: bool,
    ) -> BoxFuture<'_, Vec<Reservation>, Self::Error> {
        let court_id = court_id.to_string();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .list_reservations(&court_id, from, to, include_cancelled)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }

    fn create_reservation(
        &self,
        court_id: &str,
        reservation: NewReservation,
    ) -> BoxFuture<'_, ReservationResult, Self::Error> {
        let court_id = court_id.to_string();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .create_reservation(&court_id, reservation)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }

    fn cancel_reservation(
        &self,
        court_id: &str,
        reservation_id: &str,
    ) -> BoxFuture<'_, ReservationResult, Self::Error> {
        let court_id = court_id.to_string();
        let reservation_id = reservation_id.to_string();
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .cancel_reservation(&court_id, &reservation_id)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}
