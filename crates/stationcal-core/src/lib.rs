//! # stationcal-core
//!
//! The reconciliation engine behind a week-by-week booking calendar for
//! rental stations.
//!
//! This library owns the calendar state: which station is selected, which
//! bookings are loaded, which seven days are visible, and how a booking
//! edge dragged onto another day is written back.
//!
//! ## Features
//!
//! - **Week Window**: a seven-day window from any anchor date, moved by
//!   whole weeks in either direction.
//! - **Day Bucketing**: bookings placed on the days they start and end,
//!   compared at calendar-day granularity in a configurable zone.
//! - **Booking Store**: fetch-and-replace booking collection keyed by the
//!   selected station, with booking detail lookups.
//! - **Drag Reschedule**: an `Idle -> Dragging -> Idle` controller that
//!   moves one edge of a booking and persists it best effort.
//! - **Calendar Session**: initial load sequencing and user-facing error
//!   capture.
//!
//! ## Example
//!
//! ```rust
//! use stationcal_core::prelude::*;
//!
//! # tokio_test_block(async {
//! let api = MemoryApi::new().with_station(
//!     Station { id: "1".into(), name: "Berlin Station".into() },
//!     vec![Booking {
//!         id: "1".into(),
//!         customer_name: "John Doe".into(),
//!         start_date: parse_instant("2023-04-01T00:00:00Z").unwrap(),
//!         end_date: parse_instant("2023-04-05T00:00:00Z").unwrap(),
//!         pickup_return_station_id: "1".into(),
//!         station_name: None,
//!     }],
//! );
//!
//! let mut session = CalendarSession::new(api, LoggingPersister, parse_tz("UTC").unwrap());
//! session.load_initial().await;
//!
//! assert_eq!(session.display_range(), "Apr 01, 2023 - Apr 07, 2023");
//! let first_day = session.week_view().remove(0);
//! assert!(first_day.entries[0].is_start());
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod api;
pub mod bucket;
pub mod drag;
pub mod error;
pub mod memory;
pub mod models;
pub mod parse;
pub mod session;
pub mod store;
pub mod tz;
pub mod window;

// Re-export commonly used types at the crate root
pub use api::{BookingApi, BookingPersister, LoggingPersister};
pub use bucket::{entries_for_day, week_view};
pub use drag::{DragController, DragState, DropOutcome};
pub use error::{Operation, Result, StationCalError};
pub use memory::MemoryApi;
pub use models::{Booking, BookingUpdate, DayColumn, DayEntry, Edge, Station, VisibleDay};
pub use parse::{DayKey, parse_instant};
pub use session::CalendarSession;
pub use store::{BookingStore, UNKNOWN_STATION};
pub use window::WeekWindow;

/// Prelude module for convenient imports.
///
/// ```
/// use stationcal_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{BookingApi, BookingPersister, LoggingPersister};
    pub use crate::bucket::{entries_for_day, week_view};
    pub use crate::drag::{DragController, DragState, DropOutcome};
    pub use crate::error::{Operation, Result, StationCalError};
    pub use crate::memory::MemoryApi;
    pub use crate::models::*;
    pub use crate::parse::{DayKey, parse_instant};
    pub use crate::session::CalendarSession;
    pub use crate::store::BookingStore;
    pub use crate::tz::{format_display_instant, parse_tz};
    pub use crate::window::WeekWindow;
}
