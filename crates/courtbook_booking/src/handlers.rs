// --- File: crates/courtbook_booking/src/handlers.rs ---
use crate::logic::{
    build_day_schedule, busy_intervals, club_tz, day_bounds, open_slot, open_slots, parse_day,
    parse_local_start, resolve_local, slot_label, summarize, AvailabilityQuery,
    AvailableSlotsResponse, CancellationResponse, DayScheduleResponse, ReservationsQuery,
    ReservationsResponse, ReserveRequest, ReserveResponse, ScheduleQuery,
};
use crate::service::ClubApiError;
use crate::slots::SlotGrid;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use chrono::Utc;
use courtbook_common::error::{
    conflict, config_error, external_service_error, not_found, service_disabled, validation_error,
    CourtbookError,
};
use courtbook_common::services::{BoxedError, NewReservation, ReservationService};
use courtbook_config::{AppConfig, BookingConfig};
use std::sync::Arc;
use tracing::{info, warn};

// Define shared state needed by booking handlers
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub reservations: Arc<dyn ReservationService<Error = BoxedError>>,
}

/// Runtime gate plus config lookup shared by every handler.
fn booking_config(state: &BookingState) -> Result<&BookingConfig, CourtbookError> {
    if !state.config.use_booking {
        return Err(service_disabled("Booking service is disabled."));
    }
    state
        .config
        .booking
        .as_ref()
        .ok_or_else(|| config_error("Booking configuration missing."))
}

/// Map an upstream service failure onto the wire error.
///
/// The club API's conflict and not-found verdicts keep their status;
/// anything else is a 502.
fn map_service_error(err: BoxedError) -> CourtbookError {
    match err.0.downcast_ref::<ClubApiError>() {
        Some(ClubApiError::Conflict) => conflict("Requested slot is already taken."),
        Some(ClubApiError::NotFound(id)) => not_found(format!("Reservation not found: {id}")),
        _ => {
            warn!("club API call failed: {err}");
            external_service_error("club_api", err)
        }
    }
}

/// Handler to list the open slots of a day.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/availability", // Path relative to /api
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Open reservation slots for the day", body = AvailableSlotsResponse),
        (status = 400, description = "Bad request (e.g., invalid date format)"),
        (status = 503, description = "Booking feature disabled")
    ),
    tag = "Booking"
))]
pub async fn get_availability_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailableSlotsResponse>, CourtbookError> {
    let booking_config = booking_config(&state)?;
    let tz = club_tz(booking_config);

    let day = parse_day(&query.date, tz)
        .ok_or_else(|| validation_error("Invalid date format (YYYY-MM-DD)"))?;
    let grid = SlotGrid::from_config(booking_config);
    let court_id = query.court_id.as_deref().unwrap_or(&booking_config.court_id);

    // Read the clock once; the today filter hangs off this instant.
    let now = Utc::now().with_timezone(&tz).naive_local();
    let starts = grid.slot_starts_from(day, now);

    let (from, to) = day_bounds(day, tz);
    let reservations = state
        .reservations
        .list_reservations(
            court_id,
            from.with_timezone(&Utc),
            to.with_timezone(&Utc),
            false,
        )
        .await
        .map_err(map_service_error)?;

    let busy = busy_intervals(&reservations, tz);
    let open = open_slots(&grid, starts, &busy);
    info!(%day, court_id, open = open.len(), "computed availability");

    Ok(Json(AvailableSlotsResponse {
        slots: open
            .into_iter()
            .map(|start| open_slot(&grid, start, tz))
            .collect(),
    }))
}

/// Handler to reserve a slot.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/reserve",
    request_body = ReserveRequest,
    responses(
        (status = 200, description = "Reservation result", body = ReserveResponse),
        (status = 400, description = "Invalid or off-grid start time"),
        (status = 409, description = "Slot already taken"),
        (status = 503, description = "Booking feature disabled")
    ),
    tag = "Booking"
))]
pub async fn reserve_slot_handler(
    State(state): State<Arc<BookingState>>,
    Json(payload): Json<ReserveRequest>,
) -> Result<Json<ReserveResponse>, CourtbookError> {
    let booking_config = booking_config(&state)?;
    let tz = club_tz(booking_config);
    let grid = SlotGrid::from_config(booking_config);

    let start = parse_local_start(&payload.start_time, tz)
        .ok_or_else(|| validation_error("Invalid start_time format"))?;

    // The grid is the authoritative guard: off-grid starts never reach
    // the upstream API.
    if !grid.is_valid_slot_start(start) {
        return Err(validation_error(format!(
            "{} is not a bookable slot start",
            start.format("%Y-%m-%d %H:%M")
        )));
    }

    // The end time is always derived, never taken from the client.
    let end = grid.slot_end(start);
    let court_id = payload
        .court_id
        .as_deref()
        .unwrap_or(&booking_config.court_id);

    let reservation = NewReservation {
        start_time: resolve_local(start, tz).to_rfc3339(),
        end_time: resolve_local(end, tz).to_rfc3339(),
        member_name: payload.member_name,
        note: payload.note,
    };

    let result = state
        .reservations
        .create_reservation(court_id, reservation)
        .await
        .map_err(map_service_error)?;

    info!(court_id, slot = %slot_label(start, end), "reservation created");
    Ok(Json(ReserveResponse {
        success: true,
        reservation_id: result.reservation_id,
        message: "Court reserved successfully.".to_string(),
    }))
}

/// Handler to build the admin day schedule.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/admin/schedule",
    params(ScheduleQuery),
    responses(
        (status = 200, description = "Full slot grid of a day with occupants", body = DayScheduleResponse),
        (status = 400, description = "Invalid date format"),
        (status = 503, description = "Booking feature disabled")
    ),
    tag = "Booking"
))]
pub async fn get_day_schedule_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<DayScheduleResponse>, CourtbookError> {
    let booking_config = booking_config(&state)?;
    let tz = club_tz(booking_config);

    let day = parse_day(&query.date, tz)
        .ok_or_else(|| validation_error("Invalid date format (YYYY-MM-DD)"))?;
    let grid = SlotGrid::from_config(booking_config);
    let court_id = query.court_id.as_deref().unwrap_or(&booking_config.court_id);
    let include_cancelled = query.include_cancelled.unwrap_or(false);

    let (from, to) = day_bounds(day, tz);
    let reservations = state
        .reservations
        .list_reservations(
            court_id,
            from.with_timezone(&Utc),
            to.with_timezone(&Utc),
            include_cancelled,
        )
        .await
        .map_err(map_service_error)?;

    let schedule = build_day_schedule(&grid, day, &reservations, tz);
    Ok(Json(DayScheduleResponse {
        date: day.format("%Y-%m-%d").to_string(),
        entries: schedule.entries,
        unaligned: schedule.unaligned,
    }))
}

/// Handler to list reservations in a date range.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/admin/reservations",
    params(ReservationsQuery),
    responses(
        (status = 200, description = "Reservations in the range, sorted by start", body = ReservationsResponse),
        (status = 400, description = "Invalid date range"),
        (status = 503, description = "Booking feature disabled")
    ),
    tag = "Booking"
))]
pub async fn list_reservations_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<ReservationsQuery>,
) -> Result<Json<ReservationsResponse>, CourtbookError> {
    let booking_config = booking_config(&state)?;
    let tz = club_tz(booking_config);

    let start_date = parse_day(&query.start_date, tz)
        .ok_or_else(|| validation_error("Invalid start_date format (YYYY-MM-DD)"))?;
    let end_date = parse_day(&query.end_date, tz)
        .ok_or_else(|| validation_error("Invalid end_date format (YYYY-MM-DD)"))?;
    if end_date < start_date {
        return Err(validation_error("end_date must not be before start_date"));
    }

    let court_id = query.court_id.as_deref().unwrap_or(&booking_config.court_id);
    let include_cancelled = query.include_cancelled.unwrap_or(false);

    // end_date is inclusive: the window closes at the midnight after it.
    let (from, _) = day_bounds(start_date, tz);
    let (_, to) = day_bounds(end_date, tz);
    let mut reservations = state
        .reservations
        .list_reservations(
            court_id,
            from.with_timezone(&Utc),
            to.with_timezone(&Utc),
            include_cancelled,
        )
        .await
        .map_err(map_service_error)?;
    reservations.sort_by(|a, b| a.start_time.cmp(&b.start_time));

    Ok(Json(ReservationsResponse {
        reservations: reservations.iter().map(summarize).collect(),
    }))
}

/// Handler to cancel a reservation.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/admin/reservations/{reservation_id}",
    params(
        ("reservation_id" = String, Path, description = "The ID of the reservation to cancel")
    ),
    responses(
        (status = 200, description = "Cancellation result", body = CancellationResponse),
        (status = 404, description = "Reservation not found"),
        (status = 503, description = "Booking feature disabled")
    ),
    tag = "Booking"
))]
pub async fn cancel_reservation_handler(
    State(state): State<Arc<BookingState>>,
    Path(reservation_id): Path<String>,
) -> Result<Json<CancellationResponse>, CourtbookError> {
    let booking_config = booking_config(&state)?;

    state
        .reservations
        .cancel_reservation(&booking_config.court_id, &reservation_id)
        .await
        .map_err(map_service_error)?;

    info!(%reservation_id, "reservation cancelled");
    Ok(Json(CancellationResponse {
        success: true,
        message: "Reservation cancelled successfully.".to_string(),
    }))
}
