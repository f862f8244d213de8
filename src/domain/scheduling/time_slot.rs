//! Time slots and the search window they are drawn from.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Layout used when listing slots to the user.
const LISTING_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A candidate meeting window, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    /// Creates a slot, rejecting windows that end before they start.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::invalid_format(
                "time_slot",
                format!("end {} is not after start {}", end, start),
            ));
        }
        Ok(Self { start, end })
    }

    /// Returns the window `[start, start + minutes)`.
    pub fn starting_at(start: DateTime<Utc>, minutes: u32) -> Self {
        Self {
            start,
            end: start + Duration::minutes(i64::from(minutes)),
        }
    }

    /// Length of the slot.
    pub fn length(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} UTC",
            self.start.format(LISTING_FORMAT),
            self.end.format(LISTING_FORMAT)
        )
    }
}

/// Sorts slots ascending by start; equal starts keep their original order.
pub fn rank_slots(mut slots: Vec<TimeSlot>) -> Vec<TimeSlot> {
    slots.sort_by_key(|slot| slot.start);
    slots
}

/// Renders a 1-based numbered listing, one slot per line.
pub fn render_slot_listing(slots: &[TimeSlot]) -> String {
    slots
        .iter()
        .enumerate()
        .map(|(i, slot)| format!("{}: {}", i + 1, slot))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses a timestamp as returned by a calendar service.
///
/// Accepts RFC 3339 with an offset, or a bare `YYYY-MM-DDTHH:MM:SS[.fff]`
/// local time paired with a UTC time zone name. Other zones are not resolved
/// and yield `None`.
pub fn parse_service_timestamp(date_time: &str, time_zone: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_time) {
        return Some(dt.with_timezone(&Utc));
    }

    let zone = time_zone.trim();
    let is_utc = zone.is_empty()
        || zone.eq_ignore_ascii_case("UTC")
        || zone.eq_ignore_ascii_case("Etc/UTC")
        || zone.eq_ignore_ascii_case("GMT");
    if !is_utc {
        return None;
    }

    NaiveDateTime::parse_from_str(date_time, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Renders a timestamp in the booking wire layout `YYYY-MM-DDTHH:MM:00.000Z`.
///
/// Seconds are always written as zero.
pub fn format_booking_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:00.000Z").to_string()
}

/// `HH:MM` spelling of the end of the day.
const END_OF_DAY: &str = "24:00";

/// Time-of-day bounds used to build the search window for a requested day.
///
/// The end is either a time on the same day or the following midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    start: NaiveTime,
    /// `None` runs to the next midnight.
    end: Option<NaiveTime>,
}

impl DayWindow {
    /// Creates a window; `end` must be after `start` on the same day.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::invalid_format(
                "day_window",
                format!("window end {} must be after start {}", end, start),
            ));
        }
        Ok(Self {
            start,
            end: Some(end),
        })
    }

    /// Creates a window from `start` to the end of the day.
    pub fn until_end_of_day(start: NaiveTime) -> Self {
        Self { start, end: None }
    }

    /// Parses `HH:MM` bounds; an end of `24:00` means the next midnight.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let parse = |field: &str, raw: &str| {
            NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|_| {
                ValidationError::invalid_format(field, format!("'{}' is not HH:MM", raw))
            })
        };
        let start = parse("window_start", start)?;
        if end.trim() == END_OF_DAY {
            return Ok(Self::until_end_of_day(start));
        }
        Self::new(start, parse("window_end", end)?)
    }

    /// The search window on `date`, in UTC.
    pub fn on(&self, date: NaiveDate) -> TimeSlot {
        let end = match self.end {
            Some(end) => date.and_time(end),
            None => date.succ_opt().unwrap_or(date).and_time(NaiveTime::MIN),
        };
        TimeSlot {
            start: date.and_time(self.start).and_utc(),
            end: end.and_utc(),
        }
    }
}

impl Default for DayWindow {
    /// The whole UTC day.
    fn default() -> Self {
        Self::until_end_of_day(NaiveTime::MIN)
    }
}
