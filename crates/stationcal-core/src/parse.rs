//! Input parsing for booking timestamps and day keys.
//!
//! Booking timestamps arrive in several shapes depending on who wrote them:
//! - RFC3339 with an offset (e.g., `2023-04-01T00:00:00Z`), as the API returns
//! - a date-time without offset (e.g., `2023-04-01T10:00:00`), read as UTC
//! - a bare calendar date (e.g., `2023-04-01`), read as midnight UTC
//!
//! Day keys are always `yyyy-MM-dd`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::error::{Result, StationCalError};
use crate::tz::{MAX_YEAR, MIN_YEAR, is_supported_date};

/// A calendar day, compared and displayed as `yyyy-MM-dd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        DayKey(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        DayKey(date)
    }
}

impl std::fmt::Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = StationCalError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| {
            StationCalError::ParseError(format!(
                "Invalid day '{}'. Expected yyyy-MM-dd. Error: {}",
                trimmed, e
            ))
        })?;
        check_year(trimmed, date)?;
        Ok(DayKey(date))
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a booking timestamp in any of the accepted shapes.
///
/// # Examples
///
/// ```
/// use stationcal_core::parse::parse_instant;
///
/// let a = parse_instant("2023-04-01T00:00:00Z").unwrap();
/// let b = parse_instant("2023-04-01").unwrap();
/// assert_eq!(a, b);
/// ```
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    let instant = parse_any_instant(trimmed)?;
    check_year(trimmed, instant.date_naive())?;
    Ok(instant)
}

fn parse_any_instant(trimmed: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    if let Some(midnight) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(StationCalError::ParseError(format!(
        "Invalid booking timestamp: '{}'. Expected RFC3339, yyyy-MM-ddTHH:mm:ss or yyyy-MM-dd",
        trimmed
    )))
}

fn check_year(input: &str, date: NaiveDate) -> Result<()> {
    if is_supported_date(date) {
        Ok(())
    } else {
        Err(StationCalError::ParseError(format!(
            "'{}' is outside years {}-{}",
            input, MIN_YEAR, MAX_YEAR
        )))
    }
}

/// Serde adapter for booking timestamps: lenient on input, RFC3339 on output.
pub mod lenient_instant {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::tz::format_rfc3339_utc;

    pub fn serialize<S: Serializer>(
        dt: &DateTime<Utc>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_rfc3339_utc(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_instant(&raw).map_err(serde::de::Error::custom)
    }
}
