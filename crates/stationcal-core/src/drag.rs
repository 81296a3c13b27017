//! Drag-to-reschedule controller.
//!
//! State machine: `Idle -> Dragging -> Idle`. A drag captures one
//! [`DayEntry`]; dropping it on a day moves that edge of the booking to the
//! day, writes the change into the store, hands it to the persister and
//! returns to idle. Persistence is best effort: a failure is logged and the
//! local change stays.

use chrono_tz::Tz;

use crate::api::{BookingApi, BookingPersister};
use crate::error::{Result, StationCalError};
use crate::models::{Booking, BookingUpdate, DayEntry};
use crate::parse::DayKey;
use crate::store::BookingStore;
use crate::tz::local_midnight_to_utc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DayEntry),
}

/// What a call to [`DragController::drop_on`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// No drag was in progress.
    NotDragging,
    /// The dragged booking is no longer in the store (e.g. the station
    /// changed mid-drag).
    BookingGone { booking_id: String },
    /// The edge was moved. `persisted` is false when the persister failed.
    Rescheduled { booking: Booking, persisted: bool },
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Start dragging `entry`, replacing any drag already in progress.
    pub fn begin_drag(&mut self, entry: DayEntry) {
        tracing::debug!(booking_id = %entry.booking.id, edge = %entry.edge, "drag started");
        self.state = DragState::Dragging(entry);
    }

    /// Drop the dragged edge on `day`.
    ///
    /// Always leaves the controller idle, whatever the outcome. Only fails
    /// when `day` has no valid instant in `tz`, which chrono never produces
    /// for a real calendar day.
    pub async fn drop_on<A, P>(
        &mut self,
        day: DayKey,
        store: &mut BookingStore<A>,
        persister: &P,
        tz: Tz,
    ) -> Result<DropOutcome>
    where
        A: BookingApi,
        P: BookingPersister + ?Sized,
    {
        let DragState::Dragging(entry) = std::mem::take(&mut self.state) else {
            return Ok(DropOutcome::NotDragging);
        };

        let instant = local_midnight_to_utc(day.date(), tz).ok_or_else(|| {
            StationCalError::DateOutOfRange(format!("no valid instant on {day} in {tz}"))
        })?;

        let Some(booking) = store.booking_mut(&entry.booking.id) else {
            tracing::warn!(booking_id = %entry.booking.id, "dropped booking is no longer loaded");
            return Ok(DropOutcome::BookingGone {
                booking_id: entry.booking.id,
            });
        };

        booking.set_edge_date(entry.edge, instant);
        if booking.is_inverted() {
            tracing::warn!(
                booking_id = %booking.id,
                start = %booking.start_date,
                end = %booking.end_date,
                "booking now ends before it starts"
            );
        }
        let booking = booking.clone();

        let persisted = match persister.persist_booking(&BookingUpdate::from(&booking)).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(booking_id = %booking.id, error = %err, "failed to persist booking");
                false
            }
        };

        Ok(DropOutcome::Rescheduled { booking, persisted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::LoggingPersister;
    use crate::memory::MemoryApi;
    use crate::models::{Edge, Station};
    use crate::parse::parse_instant;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingPersister {
        updates: Mutex<Vec<BookingUpdate>>,
        fail: bool,
    }

    impl RecordingPersister {
        fn new(fail: bool) -> Self {
            Self {
                updates: Mutex::new(Vec::new()),
                fail,
            }
        }

        fn updates(&self) -> Vec<BookingUpdate> {
            self.updates.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BookingPersister for RecordingPersister {
        async fn persist_booking(&self, update: &BookingUpdate) -> Result<()> {
            self.updates.lock().unwrap().push(update.clone());
            if self.fail {
                Err(StationCalError::Network {
                    operation: crate::error::Operation::PersistBooking,
                    message: "offline".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn booking_x() -> Booking {
        Booking {
            id: "x".to_string(),
            customer_name: "John Doe".to_string(),
            start_date: parse_instant("2023-04-01T09:00:00Z").unwrap(),
            end_date: parse_instant("2023-04-05T17:00:00Z").unwrap(),
            pickup_return_station_id: "1".to_string(),
            station_name: None,
        }
    }

    fn loaded_store() -> BookingStore<MemoryApi> {
        let mut store = BookingStore::new(MemoryApi::new());
        store.select_station(Station {
            id: "1".to_string(),
            name: "Berlin Station".to_string(),
        });
        store.replace_bookings(vec![booking_x()]);
        store
    }

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn dropping_start_edge_moves_start_date() {
        let mut store = loaded_store();
        let mut drag = DragController::new();
        drag.begin_drag(DayEntry::new(booking_x(), Edge::Start));

        let outcome = drag
            .drop_on(day("2023-05-01"), &mut store, &LoggingPersister, Tz::UTC)
            .await
            .unwrap();

        let moved = &store.bookings()[0];
        assert_eq!(moved.start_day(Tz::UTC).to_string(), "2023-05-01");
        assert_eq!(moved.end_date, booking_x().end_date);
        assert!(matches!(outcome, DropOutcome::Rescheduled { persisted: true, .. }));
        assert_eq!(drag.state(), &DragState::Idle);

        let again = drag
            .drop_on(day("2023-06-01"), &mut store, &LoggingPersister, Tz::UTC)
            .await
            .unwrap();
        assert_eq!(again, DropOutcome::NotDragging);
        assert_eq!(
            store.bookings()[0].start_day(Tz::UTC).to_string(),
            "2023-05-01"
        );
    }

    #[tokio::test]
    async fn dropping_end_edge_moves_end_date_and_persists() {
        let mut store = loaded_store();
        let persister = RecordingPersister::new(false);
        let mut drag = DragController::new();
        drag.begin_drag(DayEntry::new(booking_x(), Edge::End));

        drag.drop_on(day("2023-04-03"), &mut store, &persister, Tz::UTC)
            .await
            .unwrap();

        let updates = persister.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].booking_id, "x");
        assert_eq!(
            updates[0].updated_end_date,
            parse_instant("2023-04-03").unwrap()
        );
        assert_eq!(updates[0].updated_start_date, booking_x().start_date);
    }

    #[tokio::test]
    async fn persister_failure_keeps_local_change() {
        let mut store = loaded_store();
        let persister = RecordingPersister::new(true);
        let mut drag = DragController::new();
        drag.begin_drag(DayEntry::new(booking_x(), Edge::End));

        let outcome = drag
            .drop_on(day("2023-04-07"), &mut store, &persister, Tz::UTC)
            .await
            .unwrap();

        assert!(matches!(outcome, DropOutcome::Rescheduled { persisted: false, .. }));
        assert_eq!(
            store.bookings()[0].end_day(Tz::UTC).to_string(),
            "2023-04-07"
        );
        assert!(!drag.is_dragging());
    }

    #[tokio::test]
    async fn drop_while_idle_is_noop() {
        let mut store = loaded_store();
        let persister = RecordingPersister::new(false);
        let mut drag = DragController::new();

        let outcome = drag
            .drop_on(day("2023-05-01"), &mut store, &persister, Tz::UTC)
            .await
            .unwrap();

        assert_eq!(outcome, DropOutcome::NotDragging);
        assert_eq!(store.bookings()[0], booking_x());
        assert!(persister.updates().is_empty());
    }

    #[tokio::test]
    async fn new_drag_replaces_previous_one() {
        let mut store = loaded_store();
        let mut drag = DragController::new();
        drag.begin_drag(DayEntry::new(booking_x(), Edge::Start));
        drag.begin_drag(DayEntry::new(booking_x(), Edge::End));

        drag.drop_on(day("2023-04-09"), &mut store, &LoggingPersister, Tz::UTC)
            .await
            .unwrap();

        let booking = &store.bookings()[0];
        assert_eq!(booking.start_date, booking_x().start_date);
        assert_eq!(booking.end_day(Tz::UTC).to_string(), "2023-04-09");
    }

    #[tokio::test]
    async fn start_may_move_past_end() {
        let mut store = loaded_store();
        let mut drag = DragController::new();
        drag.begin_drag(DayEntry::new(booking_x(), Edge::Start));

        drag.drop_on(day("2023-04-20"), &mut store, &LoggingPersister, Tz::UTC)
            .await
            .unwrap();

        assert!(store.bookings()[0].is_inverted());
    }

    #[tokio::test]
    async fn drop_after_station_switch_reports_gone() {
        let mut store = loaded_store();
        let mut drag = DragController::new();
        drag.begin_drag(DayEntry::new(booking_x(), Edge::Start));
        store.replace_bookings(Vec::new());

        let outcome = drag
            .drop_on(day("2023-05-01"), &mut store, &LoggingPersister, Tz::UTC)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            DropOutcome::BookingGone {
                booking_id: "x".to_string()
            }
        );
        assert!(!drag.is_dragging());
    }

    #[tokio::test]
    async fn drop_uses_calendar_zone_midnight() {
        let mut store = loaded_store();
        let berlin = crate::tz::parse_tz("Europe/Berlin").unwrap();
        let mut drag = DragController::new();
        drag.begin_drag(DayEntry::new(booking_x(), Edge::Start));

        drag.drop_on(day("2023-05-01"), &mut store, &LoggingPersister, berlin)
            .await
            .unwrap();

        let booking = &store.bookings()[0];
        assert_eq!(booking.start_date, parse_instant("2023-04-30T22:00:00Z").unwrap());
        assert_eq!(booking.start_day(berlin).to_string(), "2023-05-01");
    }
}
