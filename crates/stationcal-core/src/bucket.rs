//! Day bucketing.
//!
//! This module places bookings onto calendar days. A booking lands on the
//! day its start timestamp falls on and, independently, on the day its end
//! timestamp falls on, each truncated to a day key in the calendar zone.
//! Results are derived on demand and ordered by booking insertion order,
//! start edge before end edge.

use chrono_tz::Tz;

use crate::models::{Booking, DayColumn, DayEntry, Edge};
use crate::parse::DayKey;
use crate::window::WeekWindow;

/// Entries for every booking that starts or ends on `day`.
///
/// # Examples
///
/// ```
/// use chrono_tz::Tz;
/// use stationcal_core::bucket::entries_for_day;
/// use stationcal_core::models::Booking;
///
/// let booking: Booking = serde_json::from_str(r#"{
///     "id": "1", "customerName": "John Doe",
///     "startDate": "2023-04-01T00:00:00Z", "endDate": "2023-04-05T00:00:00Z",
///     "pickupReturnStationId": "1"
/// }"#).unwrap();
///
/// let entries = entries_for_day(&[booking], "2023-04-01".parse().unwrap(), Tz::UTC);
/// assert_eq!(entries.len(), 1);
/// assert!(entries[0].is_start());
/// ```
pub fn entries_for_day(bookings: &[Booking], day: DayKey, tz: Tz) -> Vec<DayEntry> {
    bookings
        .iter()
        .flat_map(|booking| {
            let starts = booking.start_day(tz) == day;
            let ends = booking.end_day(tz) == day;
            [(starts, Edge::Start), (ends, Edge::End)]
                .into_iter()
                .filter(|(hit, _)| *hit)
                .map(move |(_, edge)| DayEntry::new(booking.clone(), edge))
        })
        .collect()
}

/// All seven columns of `window` with their entries.
pub fn week_view(bookings: &[Booking], window: &WeekWindow, tz: Tz) -> Vec<DayColumn> {
    let columns: Vec<DayColumn> = window
        .visible_days()
        .into_iter()
        .map(|day| DayColumn {
            entries: entries_for_day(bookings, day.key, tz),
            day,
        })
        .collect();

    tracing::debug!(
        anchor = %window.current_anchor(),
        bookings = bookings.len(),
        entries = columns.iter().map(|c| c.entries.len()).sum::<usize>(),
        "bucketed week"
    );

    columns
}
