//! Core data types for stationcal.
//!
//! This module defines the primary types used throughout the library:
//! - [`Station`] - A rental pickup/return location
//! - [`Booking`] - A rental reservation with start and end timestamps
//! - [`Edge`] - Which end of a booking a calendar entry represents
//! - [`DayEntry`] - A booking placed on one calendar day
//! - [`VisibleDay`] - One column of the visible week
//! - [`DayColumn`] - A visible day together with its entries
//! - [`BookingUpdate`] - The payload sent when a booking is rescheduled

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::parse::{DayKey, lenient_instant};
use crate::tz::local_date;

/// A physical rental pickup/return location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
}

/// A single rental reservation tied to a station.
///
/// `start_date <= end_date` is expected from the backend but not enforced;
/// a drag can also leave the booking inverted (see [`Booking::is_inverted`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub customer_name: String,
    #[serde(with = "lenient_instant")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "lenient_instant")]
    pub end_date: DateTime<Utc>,
    pub pickup_return_station_id: String,
    /// Only filled in by booking detail lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_name: Option<String>,
}

impl Booking {
    /// Day key of the start timestamp in the calendar zone.
    pub fn start_day(&self, tz: Tz) -> DayKey {
        DayKey::new(local_date(self.start_date, tz))
    }

    /// Day key of the end timestamp in the calendar zone.
    pub fn end_day(&self, tz: Tz) -> DayKey {
        DayKey::new(local_date(self.end_date, tz))
    }

    /// Whether the booking ends before it starts.
    pub fn is_inverted(&self) -> bool {
        self.start_date > self.end_date
    }

    pub fn edge_date(&self, edge: Edge) -> DateTime<Utc> {
        match edge {
            Edge::Start => self.start_date,
            Edge::End => self.end_date,
        }
    }

    pub fn set_edge_date(&mut self, edge: Edge, instant: DateTime<Utc>) {
        match edge {
            Edge::Start => self.start_date = instant,
            Edge::End => self.end_date = instant,
        }
    }
}

/// Which end of a booking a calendar entry stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Start,
    End,
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Edge::Start => write!(f, "start"),
            Edge::End => write!(f, "end"),
        }
    }
}

impl std::str::FromStr for Edge {
    type Err = crate::error::StationCalError;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.to_lowercase().as_str() {
            "start" => Ok(Edge::Start),
            "end" => Ok(Edge::End),
            _ => Err(crate::error::StationCalError::ParseError(format!(
                "Unknown edge: '{}'. Expected 'start' or 'end'",
                s
            ))),
        }
    }
}

/// A booking placed on one calendar day, as either its start or its end.
///
/// A booking that starts and ends on the same day yields two entries for
/// that day, one per edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayEntry {
    pub booking: Booking,
    pub edge: Edge,
}

impl DayEntry {
    pub fn new(booking: Booking, edge: Edge) -> Self {
        Self { booking, edge }
    }

    pub fn is_start(&self) -> bool {
        self.edge == Edge::Start
    }

    pub fn is_end(&self) -> bool {
        self.edge == Edge::End
    }
}

/// One column of the visible week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleDay {
    /// Short weekday label, e.g. `Mon`.
    pub label: String,
    /// Canonical day key.
    pub key: DayKey,
}

/// A visible day with the bookings that start or end on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayColumn {
    pub day: VisibleDay,
    pub entries: Vec<DayEntry>,
}

/// Payload handed to the persistence collaborator after a reschedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    pub booking_id: String,
    #[serde(with = "lenient_instant")]
    pub updated_start_date: DateTime<Utc>,
    #[serde(with = "lenient_instant")]
    pub updated_end_date: DateTime<Utc>,
}

impl From<&Booking> for BookingUpdate {
    fn from(booking: &Booking) -> Self {
        Self {
            booking_id: booking.id.clone(),
            updated_start_date: booking.start_date,
            updated_end_date: booking.end_date,
        }
    }
}
