// --- File: crates/courtbook_booking/src/slots.rs ---
//! Slot grid calculation for court reservations.
//!
//! The club rents courts in fixed-length slots anchored to a shared daily
//! grid: the first slot starts at a fixed wall-clock time and every later
//! slot follows back to back until the latest time a slot may end. All
//! arithmetic here is club-local wall-clock time (`NaiveDateTime`);
//! time-zone resolution happens at the HTTP boundary, not in here.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use courtbook_config::BookingConfig;

/// Minutes in a calendar day; grid values beyond this are clamped.
const MINUTES_PER_DAY: u32 = 1440;

/// Default slot length in minutes.
pub const DEFAULT_SLOT_DURATION_MINUTES: u32 = 75;
/// Default minute-of-day of the first slot start (08:30).
pub const DEFAULT_FIRST_SLOT_MINUTE: u32 = 510;
/// Default minute-of-day by which the last slot must end (22:15).
pub const DEFAULT_LAST_SLOT_END_MINUTE: u32 = 1335;

/// The fixed daily reservation grid.
///
/// A start time is on the grid when it is reachable from the first slot
/// start by whole multiples of the slot duration and the slot still ends
/// by the configured latest end. The same three values drive both slot
/// generation and validation, so the two can never disagree.
///
/// A degenerate grid (zero duration, or a window too small for one slot)
/// produces no slots and validates nothing; it never panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGrid {
    duration_minutes: u32,
    first_start_minute: u32,
    last_end_minute: u32,
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self {
            duration_minutes: DEFAULT_SLOT_DURATION_MINUTES,
            first_start_minute: DEFAULT_FIRST_SLOT_MINUTE,
            last_end_minute: DEFAULT_LAST_SLOT_END_MINUTE,
        }
    }
}

impl SlotGrid {
    /// Create a grid from raw minute-of-day values.
    pub fn new(duration_minutes: u32, first_start_minute: u32, last_end_minute: u32) -> Self {
        Self {
            duration_minutes,
            first_start_minute,
            last_end_minute,
        }
    }

    /// Build the grid from the booking configuration section.
    ///
    /// Missing or malformed schedule fields fall back to the club
    /// defaults (75 minute slots, 08:30 first start, 22:15 latest end),
    /// so a config typo degrades to the stock schedule instead of an
    /// unbootable service.
    pub fn from_config(config: &BookingConfig) -> Self {
        let duration_minutes = config
            .slot_duration_minutes
            .map(u32::from)
            .filter(|d| *d > 0)
            .unwrap_or(DEFAULT_SLOT_DURATION_MINUTES);
        let first_start_minute = config
            .first_slot
            .as_deref()
            .and_then(parse_minute_of_day)
            .unwrap_or(DEFAULT_FIRST_SLOT_MINUTE);
        let last_end_minute = config
            .last_slot_end
            .as_deref()
            .and_then(parse_minute_of_day)
            .unwrap_or(DEFAULT_LAST_SLOT_END_MINUTE);
        Self::new(duration_minutes, first_start_minute, last_end_minute)
    }

    /// Slot length as a chrono duration.
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Minute-of-day of the latest start still ending inside the window,
    /// or `None` for a grid no slot fits into.
    pub fn latest_start_minute(&self) -> Option<u32> {
        if self.duration_minutes == 0 {
            return None;
        }
        let last_end = self.last_end_minute.min(MINUTES_PER_DAY);
        let latest = last_end.checked_sub(self.duration_minutes)?;
        if latest < self.first_start_minute {
            return None;
        }
        Some(latest)
    }

    /// All slot starts of a day, in ascending order.
    ///
    /// Only the calendar date matters; the caller is expected to have
    /// discarded any time-of-day component already (see
    /// [`crate::logic::parse_day`]). The sequence is recomputed fresh on
    /// every call.
    pub fn slot_starts_on(&self, day: NaiveDate) -> Vec<NaiveDateTime> {
        let Some(latest) = self.latest_start_minute() else {
            return Vec::new();
        };
        let day_start = day.and_time(NaiveTime::MIN);
        let mut starts = Vec::new();
        let mut minute = self.first_start_minute;
        while minute <= latest {
            starts.push(day_start + Duration::minutes(i64::from(minute)));
            minute += self.duration_minutes;
        }
        starts
    }

    /// Slot starts of a day that are still reachable at `now`.
    ///
    /// Past starts are dropped only when `day` is the calendar date of
    /// `now` itself; any other day, past or future, gets the full grid.
    /// A start exactly equal to `now` is kept. The comparison is by
    /// calendar date, not a rolling 24 hour horizon, so the filter
    /// switches off at local midnight.
    pub fn slot_starts_from(&self, day: NaiveDate, now: NaiveDateTime) -> Vec<NaiveDateTime> {
        let starts = self.slot_starts_on(day);
        if day != now.date() {
            return starts;
        }
        starts.into_iter().filter(|start| *start >= now).collect()
    }

    /// End instant of a slot starting at `start`.
    ///
    /// Total: defined for any datetime, including ones that are not
    /// valid slot starts.
    pub fn slot_end(&self, start: NaiveDateTime) -> NaiveDateTime {
        start + self.duration()
    }

    /// Whether `start` is a bookable slot start on this grid.
    ///
    /// True iff the minute-of-day lies inside the window and sits on the
    /// grid. Seconds are ignored for the check; the calendar date does
    /// not matter, only the time of day.
    pub fn is_valid_slot_start(&self, start: NaiveDateTime) -> bool {
        let Some(latest) = self.latest_start_minute() else {
            return false;
        };
        let minute = start.hour() * 60 + start.minute();
        minute >= self.first_start_minute
            && minute <= latest
            && (minute - self.first_start_minute) % self.duration_minutes == 0
    }
}

/// Parse an "HH:MM" wall-clock string into its minute of day.
fn parse_minute_of_day(value: &str) -> Option<u32> {
    let time = NaiveTime::parse_from_str(value, "%H:%M").ok()?;
    Some(time.hour() * 60 + time.minute())
}
