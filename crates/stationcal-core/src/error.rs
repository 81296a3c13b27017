//! Error types for stationcal-core.
//!
//! This module defines the closed set of failures the engine can report:
//! collaborator failures (non-success responses, transport failures,
//! missing records) and local failures (parsing, timezone names, calendar
//! overflow). Conversion to display strings happens at the boundary via
//! [`StationCalError::user_message`].

use thiserror::Error;

/// A collaborator call made by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Station search.
    FetchStations,
    /// Booking list for a station.
    FetchBookings,
    /// A single booking by id.
    FetchBookingDetails,
    /// Write-back of a rescheduled booking.
    PersistBooking,
}

impl Operation {
    /// The fixed, operation-specific failure message.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::FetchStations => "Failed to fetch stations",
            Operation::FetchBookings => "Failed to fetch bookings",
            Operation::FetchBookingDetails => "Failed to fetch booking details",
            Operation::PersistBooking => "Failed to save booking",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::FetchStations => write!(f, "fetch_stations"),
            Operation::FetchBookings => write!(f, "fetch_bookings"),
            Operation::FetchBookingDetails => write!(f, "fetch_booking_details"),
            Operation::PersistBooking => write!(f, "persist_booking"),
        }
    }
}

/// The main error type for stationcal operations.
#[derive(Debug, Error)]
pub enum StationCalError {
    /// The collaborator answered with a non-success status.
    #[error("{}: HTTP {status}", .operation.failure_message())]
    Fetch { operation: Operation, status: u16 },

    /// The collaborator could not be reached or its payload was unreadable.
    #[error("{}: {message}", .operation.failure_message())]
    Network {
        operation: Operation,
        message: String,
    },

    /// A booking detail lookup found no matching record.
    #[error("Booking {booking_id} not found at station {station_id}")]
    NotFound {
        station_id: String,
        booking_id: String,
    },

    /// Error parsing a timestamp or day key.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid timezone name provided.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Week navigation left the representable calendar.
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}

impl StationCalError {
    /// Message suitable for showing to a user.
    ///
    /// Collaborator failures collapse to their fixed operation message; the
    /// status code and transport details stay in `Display`/logs.
    pub fn user_message(&self) -> String {
        match self {
            StationCalError::Fetch { operation, .. }
            | StationCalError::Network { operation, .. } => {
                operation.failure_message().to_string()
            }
            StationCalError::NotFound { .. } => "Booking not found".to_string(),
            other => other.to_string(),
        }
    }

    /// The collaborator call that failed, if any.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            StationCalError::Fetch { operation, .. }
            | StationCalError::Network { operation, .. } => Some(*operation),
            StationCalError::NotFound { .. } => Some(Operation::FetchBookingDetails),
            _ => None,
        }
    }
}

/// Result type alias for stationcal operations.
pub type Result<T> = std::result::Result<T, StationCalError>;
