// File: crates/courtbook_booking/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{
    AvailabilityQuery, AvailableSlotsResponse, CancellationResponse, DayScheduleResponse, OpenSlot,
    ReservationSummary, ReservationsQuery, ReservationsResponse, ReserveRequest, ReserveResponse,
    ScheduleEntry, ScheduleQuery,
};

#[utoipa::path(
    get,
    path = "/availability",
    params(
        ("date" = String, Query, description = "Day to list open slots for, YYYY-MM-DD", example = "2025-06-12", format = "date"),
        ("court_id" = Option<String>, Query, description = "Court to check; defaults to the configured court", example = "court-1")
    ),
    responses(
        (status = 200, description = "Open reservation slots for the day", body = AvailableSlotsResponse,
         example = json!({
             "slots": [
                 {
                     "start_time": "2025-06-12T08:30:00+02:00",
                     "end_time": "2025-06-12T09:45:00+02:00",
                     "label": "08:30 - 09:45"
                 }
             ]
         })
        ),
        (status = 400, description = "Invalid date format",
         example = json!({"error": {"message": "Validation error: Invalid date format (YYYY-MM-DD)", "code": 400}})
        ),
        (status = 503, description = "Booking feature disabled")
    )
)]
fn doc_get_availability_handler() {}

#[utoipa::path(
    post,
    path = "/reserve",
    request_body(content = ReserveRequest, example = json!({
        "start_time": "2025-06-12T16:00:00+02:00",
        "member_name": "R. Federer",
        "note": "doubles with guests"
    })),
    responses(
        (status = 200, description = "Reservation result", body = ReserveResponse,
         example = json!({
             "success": true,
             "reservation_id": "res-8161",
             "message": "Court reserved successfully."
         })
        ),
        (status = 400, description = "Invalid or off-grid start time"),
        (status = 409, description = "Slot already taken",
         example = json!({"error": {"message": "Conflict: Requested slot is already taken.", "code": 409}})
        ),
        (status = 503, description = "Booking feature disabled")
    )
)]
fn doc_reserve_slot_handler() {}

#[utoipa::path(
    get,
    path = "/admin/schedule",
    params(
        ("date" = String, Query, description = "Day to build the schedule for, YYYY-MM-DD", example = "2025-06-12", format = "date"),
        ("court_id" = Option<String>, Query, description = "Court to check; defaults to the configured court"),
        ("include_cancelled" = Option<bool>, Query, description = "Whether to include cancelled reservations", example = false)
    ),
    responses(
        (status = 200, description = "Full slot grid of the day with occupants", body = DayScheduleResponse,
         example = json!({
             "date": "2025-06-12",
             "entries": [
                 {
                     "start_time": "2025-06-12T08:30:00+02:00",
                     "end_time": "2025-06-12T09:45:00+02:00",
                     "label": "08:30 - 09:45",
                     "reservation": null
                 }
             ],
             "unaligned": []
         })
        ),
        (status = 400, description = "Invalid date format"),
        (status = 503, description = "Booking feature disabled")
    )
)]
fn doc_get_day_schedule_handler() {}

#[utoipa::path(
    get,
    path = "/admin/reservations",
    params(
        ("start_date" = String, Query, description = "Start date in YYYY-MM-DD format", example = "2025-06-09", format = "date"),
        ("end_date" = String, Query, description = "End date in YYYY-MM-DD format, inclusive", example = "2025-06-15", format = "date"),
        ("court_id" = Option<String>, Query, description = "Court to list; defaults to the configured court"),
        ("include_cancelled" = Option<bool>, Query, description = "Whether to include cancelled reservations", example = false)
    ),
    responses(
        (status = 200, description = "Reservations in the range, sorted by start", body = ReservationsResponse),
        (status = 400, description = "Invalid date range"),
        (status = 503, description = "Booking feature disabled")
    )
)]
fn doc_list_reservations_handler() {}

#[utoipa::path(
    delete,
    path = "/admin/reservations/{reservation_id}",
    params(
        ("reservation_id" = String, Path, description = "The ID of the reservation to cancel")
    ),
    responses(
        (status = 200, description = "Cancellation result", body = CancellationResponse,
         example = json!({
             "success": true,
             "message": "Reservation cancelled successfully."
         })
        ),
        (status = 404, description = "Reservation not found",
         example = json!({"error": {"message": "Not found: Reservation not found: res-8161", "code": 404}})
        ),
        (status = 503, description = "Booking feature disabled")
    )
)]
fn doc_cancel_reservation_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_availability_handler,
        doc_reserve_slot_handler,
        doc_get_day_schedule_handler,
        doc_list_reservations_handler,
        doc_cancel_reservation_handler
    ),
    components(
        schemas(
            AvailabilityQuery,
            AvailableSlotsResponse,
            OpenSlot,
            ReserveRequest,
            ReserveResponse,
            ScheduleQuery,
            DayScheduleResponse,
            ScheduleEntry,
            ReservationSummary,
            ReservationsQuery,
            ReservationsResponse,
            CancellationResponse
        )
    ),
    tags(
        (name = "booking", description = "Court Booking API")
    ),
    servers(
        (url = "/api", description = "Court booking API server")
    )
)]
pub struct BookingApiDoc;
