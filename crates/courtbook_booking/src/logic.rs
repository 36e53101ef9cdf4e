// --- File: crates/courtbook_booking/src/logic.rs ---
//! Composition logic for the court booking endpoints.
//!
//! Everything here is deterministic: parsing of incoming day/start
//! values, resolution of club-local wall times, overlap filtering of
//! the slot grid against busy intervals, and assembly of the admin day
//! schedule. The handlers own the clock and the upstream service.

use crate::slots::SlotGrid;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use courtbook_config::BookingConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Data Structures ---

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailabilityQuery {
    /// Day to list open slots for, YYYY-MM-DD (a datetime is tolerated,
    /// only its date is used)
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-06-12"))]
    pub date: String,

    /// Court to check; defaults to the configured court
    #[cfg_attr(feature = "openapi", schema(example = "court-1"))]
    pub court_id: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AvailableSlotsResponse {
    pub slots: Vec<OpenSlot>,
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct OpenSlot {
    #[cfg_attr(feature = "openapi", schema(example = "2025-06-12T08:30:00+02:00"))]
    pub start_time: String, // RFC 3339, club-local offset
    #[cfg_attr(feature = "openapi", schema(example = "2025-06-12T09:45:00+02:00"))]
    pub end_time: String, // RFC 3339, club-local offset
    #[cfg_attr(feature = "openapi", schema(example = "08:30 - 09:45"))]
    pub label: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ReserveRequest {
    /// Desired slot start, RFC 3339 or club-local "YYYY-MM-DDTHH:MM".
    /// The end time is always derived from the slot grid, never sent by
    /// the client.
    pub start_time: String,
    pub member_name: String,
    pub note: Option<String>,
    pub court_id: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ReserveResponse {
    pub success: bool,
    pub reservation_id: Option<String>,
    pub message: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ScheduleQuery {
    /// Day to build the schedule for, YYYY-MM-DD
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-06-12"))]
    pub date: String,
    pub court_id: Option<String>,
    pub include_cancelled: Option<bool>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DayScheduleResponse {
    pub date: String,
    pub entries: Vec<ScheduleEntry>,
    /// Reservations whose start does not sit on the current grid, e.g.
    /// made under an older schedule. Surfaced instead of dropped.
    pub unaligned: Vec<ReservationSummary>,
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ScheduleEntry {
    pub start_time: String,
    pub end_time: String,
    pub label: String,
    pub reservation: Option<ReservationSummary>,
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ReservationSummary {
    pub reservation_id: String,
    pub member_name: String,
    pub note: Option<String>,
    pub status: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ReservationsQuery {
    /// Start date in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-06-09"))]
    pub start_date: String,
    /// End date in YYYY-MM-DD format, inclusive
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-06-15"))]
    pub end_date: String,
    pub court_id: Option<String>,
    pub include_cancelled: Option<bool>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ReservationsResponse {
    pub reservations: Vec<ReservationSummary>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CancellationResponse {
    pub success: bool,
    pub message: String,
}

// --- Parsing ---

/// Parse a day reference, using only its calendar date.
///
/// Accepts a plain date, an RFC 3339 datetime (converted to club-local
/// time first), or a naive local datetime. Anything else is `None`,
/// never an error.
pub fn parse_day(input: &str, tz: Tz) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&tz).date_naive());
    }
    parse_naive_datetime(input).map(|dt| dt.date())
}

/// Parse a slot start into club-local wall time.
///
/// RFC 3339 input is converted into the club time zone; a naive
/// datetime is taken as club-local as written.
pub fn parse_local_start(input: &str, tz: Tz) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&tz).naive_local());
    }
    parse_naive_datetime(input)
}

fn parse_naive_datetime(input: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// The club's time zone from configuration, defaulting to Europe/Zurich.
pub fn club_tz(config: &BookingConfig) -> Tz {
    config
        .time_zone
        .as_deref()
        .and_then(|name| Tz::from_str(name).ok())
        .unwrap_or(chrono_tz::Europe::Zurich)
}

/// Resolve a club-local wall time to an instant in the club time zone.
///
/// DST makes this lossy twice a year: an ambiguous wall time (clocks
/// rolled back) resolves to the earlier instant, a nonexistent one
/// (clocks rolled forward) shifts ahead one hour.
pub fn resolve_local(naive: NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => dt,
        chrono::LocalResult::Ambiguous(earlier, _) => earlier,
        chrono::LocalResult::None => {
            let shifted = naive + Duration::hours(1);
            tz.from_local_datetime(&shifted)
                .earliest()
                .unwrap_or_else(|| tz.from_utc_datetime(&naive))
        }
    }
}

/// Local midnight of `day` as an instant, for upstream range queries.
pub fn day_bounds(day: NaiveDate, tz: Tz) -> (DateTime<Tz>, DateTime<Tz>) {
    let start = resolve_local(day.and_time(NaiveTime::MIN), tz);
    let end = resolve_local((day + Duration::days(1)).and_time(NaiveTime::MIN), tz);
    (start, end)
}

// --- Availability Logic ---

/// Convert upstream reservations into sorted club-local busy intervals.
///
/// Cancelled reservations do not block a slot. Reservations with
/// unparseable times are skipped; the upstream wire format is not ours
/// to reject a whole day over.
pub fn busy_intervals(
    reservations: &[courtbook_common::services::Reservation],
    tz: Tz,
) -> Vec<(NaiveDateTime, NaiveDateTime)> {
    let mut intervals: Vec<(NaiveDateTime, NaiveDateTime)> = reservations
        .iter()
        .filter(|r| r.status != "cancelled")
        .filter_map(|r| {
            let start = DateTime::parse_from_rfc3339(&r.start_time).ok()?;
            let end = DateTime::parse_from_rfc3339(&r.end_time).ok()?;
            Some((
                start.with_timezone(&tz).naive_local(),
                end.with_timezone(&tz).naive_local(),
            ))
        })
        .collect();
    intervals.sort_by_key(|(start, _)| *start);
    intervals
}

/// Drop every slot start that overlaps a busy interval.
///
/// Overlap test: `slot_start < busy_end && slot_end > busy_start`. The
/// test is grid-independent, so reservations made under an older grid
/// still block the slots they cover.
pub fn open_slots(
    grid: &SlotGrid,
    starts: Vec<NaiveDateTime>,
    busy: &[(NaiveDateTime, NaiveDateTime)],
) -> Vec<NaiveDateTime> {
    starts
        .into_iter()
        .filter(|start| {
            let end = grid.slot_end(*start);
            !busy
                .iter()
                .any(|(busy_start, busy_end)| *start < *busy_end && end > *busy_start)
        })
        .collect()
}

/// Human label for a slot, e.g. "08:30 - 09:45".
pub fn slot_label(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"))
}

/// Render a club-local slot as an [`OpenSlot`] wire value.
pub fn open_slot(grid: &SlotGrid, start: NaiveDateTime, tz: Tz) -> OpenSlot {
    let end = grid.slot_end(start);
    OpenSlot {
        start_time: resolve_local(start, tz).to_rfc3339(),
        end_time: resolve_local(end, tz).to_rfc3339(),
        label: slot_label(start, end),
    }
}

// --- Schedule Assembly ---

pub struct DaySchedule {
    pub entries: Vec<ScheduleEntry>,
    pub unaligned: Vec<ReservationSummary>,
}

/// Pair every slot of the full, unfiltered grid with the reservation
/// occupying it.
///
/// Matching is by exact grid start in club-local time. Reservations off
/// the current grid, or starting on another calendar day (upstream range
/// queries can return overnight spills), land in `unaligned` rather than
/// disappearing.
pub fn build_day_schedule(
    grid: &SlotGrid,
    day: NaiveDate,
    reservations: &[courtbook_common::services::Reservation],
    tz: Tz,
) -> DaySchedule {
    let mut sorted: Vec<_> = reservations.to_vec();
    sorted.sort_by(|a, b| a.start_time.cmp(&b.start_time));

    let mut placed: Vec<(NaiveDateTime, ReservationSummary)> = Vec::new();
    let mut unaligned = Vec::new();
    for reservation in &sorted {
        let summary = summarize(reservation);
        match DateTime::parse_from_rfc3339(&reservation.start_time) {
            Ok(start) => {
                let local = start.with_timezone(&tz).naive_local();
                if local.date() == day && grid.is_valid_slot_start(local) {
                    placed.push((local, summary));
                } else {
                    unaligned.push(summary);
                }
            }
            Err(_) => unaligned.push(summary),
        }
    }

    let entries = grid
        .slot_starts_on(day)
        .into_iter()
        .map(|start| {
            let end = grid.slot_end(start);
            let reservation = placed
                .iter()
                .find(|(slot, _)| *slot == start)
                .map(|(_, summary)| summary.clone());
            ScheduleEntry {
                start_time: resolve_local(start, tz).to_rfc3339(),
                end_time: resolve_local(end, tz).to_rfc3339(),
                label: slot_label(start, end),
                reservation,
            }
        })
        .collect();

    DaySchedule { entries, unaligned }
}

/// Flatten an upstream reservation into the wire summary.
pub fn summarize(reservation: &courtbook_common::services::Reservation) -> ReservationSummary {
    ReservationSummary {
        reservation_id: reservation.reservation_id.clone(),
        member_name: reservation.member_name.clone(),
        note: reservation.note.clone(),
        status: reservation.status.clone(),
        start_time: reservation.start_time.clone(),
        end_time: reservation.end_time.clone(),
    }
}
