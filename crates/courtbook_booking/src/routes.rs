// --- File: crates/courtbook_booking/src/routes.rs ---

use crate::handlers::{
    cancel_reservation_handler, get_availability_handler, get_day_schedule_handler,
    list_reservations_handler, reserve_slot_handler, BookingState,
};
use crate::service::{BoxedReservationService, ClubApiService};
use axum::{
    routing::{delete, get, post},
    Router,
};
use courtbook_common::services::{BoxedError, ReservationService};
use courtbook_config::AppConfig;
use std::sync::Arc;
use tracing::error;

/// Creates a router containing all routes for the court booking feature,
/// backed by the club API client from the configuration.
///
/// Returns an empty router when the booking section is missing; the
/// runtime `use_booking` flag is checked per request by the handlers.
pub fn routes(config: Arc<AppConfig>) -> Router {
    match config.booking.as_ref() {
        Some(booking_config) => {
            let service = Arc::new(BoxedReservationService::new(ClubApiService::new(
                booking_config,
            )));
            routes_with_service(config, service)
        }
        None => {
            error!("Booking config missing; booking routes disabled.");
            Router::new()
        }
    }
}

/// Creates the booking router over an explicit reservation service.
///
/// The backend's service factory and the integration tests use this to
/// swap the club API client for another implementation.
pub fn routes_with_service(
    config: Arc<AppConfig>,
    service: Arc<dyn ReservationService<Error = BoxedError>>,
) -> Router {
    let state = Arc::new(BookingState {
        config,
        reservations: service,
    });

    Router::new()
        .route("/availability", get(get_availability_handler))
        .route("/reserve", post(reserve_slot_handler))
        .route("/admin/schedule", get(get_day_schedule_handler))
        .route("/admin/reservations", get(list_reservations_handler))
        .route(
            "/admin/reservations/{reservation_id}",
            delete(cancel_reservation_handler),
        )
        .with_state(state)
}
