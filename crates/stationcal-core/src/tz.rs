//! Calendar zone utilities.
//!
//! Booking timestamps are stored in UTC. Which calendar day a timestamp
//! belongs to is decided in a single calendar zone (UTC unless configured),
//! the same way a browser formats dates in its local time.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, StationCalError};

/// Earliest calendar year the engine accepts.
pub const MIN_YEAR: i32 = 1;
/// Latest calendar year the engine accepts.
///
/// Keeps every instant far enough from chrono's limits that shifting it
/// into any zone stays representable.
pub const MAX_YEAR: i32 = 9999;

/// Whether `date` lies within [`MIN_YEAR`]..=[`MAX_YEAR`].
pub fn is_supported_date(date: NaiveDate) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

/// Parse an IANA timezone name into a [`chrono_tz::Tz`].
///
/// # Examples
///
/// ```
/// use stationcal_core::tz::parse_tz;
///
/// let tz = parse_tz("Europe/Berlin").unwrap();
/// assert_eq!(tz.to_string(), "Europe/Berlin");
/// ```
pub fn parse_tz(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| StationCalError::InvalidTimezone(name.to_string()))
}

/// The calendar date of a UTC instant, as seen in `tz`.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Interpret a wall-clock time in `tz` and convert it to UTC.
///
/// Ambiguous times resolve to the earlier occurrence. Nonexistent times
/// yield `None`.
pub fn local_to_utc(local: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// The first valid instant of `date` in `tz`, in UTC.
///
/// Usually local midnight. In zones whose DST switch skips midnight the
/// first hour that exists on that day is used instead.
pub fn local_midnight_to_utc(date: NaiveDate, tz: Tz) -> Option<DateTime<Utc>> {
    (0..24)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|local| local_to_utc(local, tz))
}

/// Format a UTC datetime as RFC3339 with Z suffix.
///
/// Fractional seconds are kept when present.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use stationcal_core::tz::format_rfc3339_utc;
///
/// let dt = Utc.with_ymd_and_hms(2023, 4, 1, 0, 0, 0).single().unwrap();
/// assert_eq!(format_rfc3339_utc(&dt), "2023-04-01T00:00:00Z");
/// ```
pub fn format_rfc3339_utc(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Human date label, e.g. `Apr 01, 2023`.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Human date label of a booking timestamp, in the calendar zone.
pub fn format_display_instant(instant: DateTime<Utc>, tz: Tz) -> String {
    format_display_date(local_date(instant, tz))
}
