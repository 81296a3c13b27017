//! Calendar session: the application state a booking calendar view drives.
//!
//! A [`CalendarSession`] wires the booking store, the week window and the
//! drag controller together and is the one place where collaborator errors
//! become a user-facing message. Construct one per view; nothing here is
//! global.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::api::{BookingApi, BookingPersister};
use crate::bucket::week_view;
use crate::drag::{DragController, DropOutcome};
use crate::error::Result;
use crate::models::{Booking, DayColumn, DayEntry, Station, VisibleDay};
use crate::parse::DayKey;
use crate::store::BookingStore;
use crate::tz::local_date;
use crate::window::WeekWindow;

pub struct CalendarSession<A, P> {
    store: BookingStore<A>,
    persister: P,
    window: WeekWindow,
    drag: DragController,
    tz: Tz,
    loading: bool,
    error_message: Option<String>,
}

impl<A: BookingApi, P: BookingPersister> CalendarSession<A, P> {
    /// A session whose window starts today in `tz`.
    pub fn new(api: A, persister: P, tz: Tz) -> Self {
        Self::with_window(api, persister, tz, WeekWindow::today(tz))
    }

    pub fn with_window(api: A, persister: P, tz: Tz, window: WeekWindow) -> Self {
        Self {
            store: BookingStore::new(api),
            persister,
            window,
            drag: DragController::new(),
            tz,
            loading: false,
            error_message: None,
        }
    }

    pub fn store(&self) -> &BookingStore<A> {
        &self.store
    }

    pub fn persister(&self) -> &P {
        &self.persister
    }

    pub fn window(&self) -> &WeekWindow {
        &self.window
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Initial load: discover stations, select the first, fetch its
    /// bookings and move the window to the earliest booking date.
    ///
    /// On failure the window keeps its anchor and the error is recorded for
    /// display. `loading` is reset on every path.
    pub async fn load_initial(&mut self) {
        self.load_matching("").await
    }

    /// [`load_initial`](Self::load_initial) with a station search query.
    pub async fn load_matching(&mut self, query: &str) {
        self.loading = true;
        self.error_message = None;

        let outcome = self.fetch_initial(query).await;
        self.record(outcome);

        self.loading = false;
    }

    async fn fetch_initial(&mut self, query: &str) -> Result<Option<NaiveDate>> {
        let stations = self.store.fetch_stations_matching(query).await?;
        if stations.is_empty() {
            return Ok(None);
        }

        let earliest = self
            .store
            .earliest_booking_date()
            .map(|instant| local_date(instant, self.tz));
        if let Some(anchor) = earliest {
            tracing::debug!(%anchor, "moving window to earliest booking");
            self.window.set_anchor(anchor);
        }
        Ok(earliest)
    }

    /// Search stations; a hit selects the first result and loads its
    /// bookings. Failures are recorded and yield an empty list.
    pub async fn search_stations(&mut self, query: &str) -> Vec<Station> {
        self.error_message = None;
        let outcome = self.store.fetch_stations_matching(query).await;
        self.record(outcome).unwrap_or_default()
    }

    /// Switch to `station` and load its bookings. The window stays put.
    pub async fn select_station(&mut self, station: Station) {
        self.error_message = None;
        let station_id = station.id.clone();
        self.store.select_station(station);

        let outcome = self
            .store
            .fetch_bookings_for(&station_id)
            .await
            .map(|bookings| bookings.len());
        self.record(outcome);
    }

    /// Load the detail view of one booking, with its station name.
    pub async fn open_booking(&mut self, station_id: &str, booking_id: &str) -> Option<Booking> {
        self.error_message = None;
        let outcome = self
            .store
            .fetch_booking_details(station_id, booking_id)
            .await
            .cloned();
        self.record(outcome)
    }

    pub fn visible_days(&self) -> Vec<VisibleDay> {
        self.window.visible_days()
    }

    pub fn display_range(&self) -> String {
        self.window.display_range()
    }

    pub fn previous_week(&mut self) -> Result<()> {
        self.window.previous_week()
    }

    pub fn next_week(&mut self) -> Result<()> {
        self.window.next_week()
    }

    pub fn advance(&mut self, weeks: i64) -> Result<()> {
        self.window.advance(weeks)
    }

    pub fn entries_for_day(&self, day: DayKey) -> Vec<DayEntry> {
        self.store.entries_for_day(day, self.tz)
    }

    /// The visible week, bucketed.
    pub fn week_view(&self) -> Vec<DayColumn> {
        week_view(self.store.bookings(), &self.window, self.tz)
    }

    pub fn begin_drag(&mut self, entry: DayEntry) {
        self.drag.begin_drag(entry);
    }

    /// Drop the current drag on `day`. Only call this for drops onto a day
    /// cell; a drop anywhere else should leave the drag untouched.
    pub async fn drop_on(&mut self, day: DayKey) -> Result<DropOutcome> {
        self.drag
            .drop_on(day, &mut self.store, &self.persister, self.tz)
            .await
    }

    fn record<T>(&mut self, outcome: Result<T>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::error!(error = %err, "calendar operation failed");
                self.error_message = Some(err.user_message());
                None
            }
        }
    }
}
