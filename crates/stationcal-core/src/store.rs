//! Booking repository.
//!
//! [`BookingStore`] owns the authoritative booking collection, the selected
//! station and the last booking detail lookup. Fetches replace the
//! collection wholesale; whichever fetch completes last wins.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::api::BookingApi;
use crate::bucket::entries_for_day;
use crate::error::{Operation, Result, StationCalError};
use crate::models::{Booking, DayEntry, Station};
use crate::parse::DayKey;

/// Station name used when a booking's station is not in the station list.
pub const UNKNOWN_STATION: &str = "Unknown Station";

#[derive(Debug)]
pub struct BookingStore<A> {
    api: A,
    selected_station: Option<Station>,
    bookings: Vec<Booking>,
    booking_details: Option<Booking>,
}

impl<A: BookingApi> BookingStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            selected_station: None,
            bookings: Vec::new(),
            booking_details: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Make `station` the selected one. Does not fetch.
    pub fn select_station(&mut self, station: Station) {
        tracing::debug!(station_id = %station.id, "selected station");
        self.selected_station = Some(station);
    }

    pub fn selected_station(&self) -> Option<&Station> {
        self.selected_station.as_ref()
    }

    /// Replace the whole collection.
    pub fn replace_bookings(&mut self, bookings: Vec<Booking>) {
        self.bookings = bookings;
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn booking_mut(&mut self, booking_id: &str) -> Option<&mut Booking> {
        self.bookings.iter_mut().find(|b| b.id == booking_id)
    }

    pub fn booking_details(&self) -> Option<&Booking> {
        self.booking_details.as_ref()
    }

    /// Fetch all bookings of a station and make them the collection.
    pub async fn fetch_bookings_for(&mut self, station_id: &str) -> Result<&[Booking]> {
        let bookings = self.api.get_bookings(station_id, "", "").await?;
        tracing::debug!(station_id, count = bookings.len(), "fetched bookings");
        self.replace_bookings(bookings);
        Ok(&self.bookings)
    }

    /// Search stations. When anything matches, the first result is selected
    /// and its bookings are fetched before returning.
    pub async fn fetch_stations_matching(&mut self, query: &str) -> Result<Vec<Station>> {
        let stations = self.api.get_stations(query).await?;
        tracing::debug!(query, count = stations.len(), "fetched stations");

        if let Some(first) = stations.first() {
            self.select_station(first.clone());
            self.fetch_bookings_for(&first.id).await?;
        }

        Ok(stations)
    }

    /// Fetch one booking and join its station name from the station list.
    ///
    /// The result also becomes the store's booking details.
    pub async fn fetch_booking_details(
        &mut self,
        station_id: &str,
        booking_id: &str,
    ) -> Result<&Booking> {
        let mut booking = self
            .api
            .get_booking_details(station_id, booking_id)
            .await?;

        let stations = self
            .api
            .get_stations("")
            .await
            .map_err(|err| reattribute(err, Operation::FetchBookingDetails))?;

        let station_name = stations
            .into_iter()
            .find(|station| station.id == booking.pickup_return_station_id)
            .map(|station| station.name)
            .unwrap_or_else(|| UNKNOWN_STATION.to_string());
        booking.station_name = Some(station_name);

        Ok(self.booking_details.insert(booking))
    }

    /// Smallest start or end timestamp in the collection.
    pub fn earliest_booking_date(&self) -> Option<DateTime<Utc>> {
        self.bookings
            .iter()
            .flat_map(|b| [b.start_date, b.end_date])
            .min()
    }

    /// See [`entries_for_day`].
    pub fn entries_for_day(&self, day: DayKey, tz: Tz) -> Vec<DayEntry> {
        entries_for_day(&self.bookings, day, tz)
    }
}

// A station lookup made on behalf of a detail view reports as a detail failure.
fn reattribute(err: StationCalError, operation: Operation) -> StationCalError {
    match err {
        StationCalError::Fetch { status, .. } => StationCalError::Fetch { operation, status },
        StationCalError::Network { message, .. } => StationCalError::Network { operation, message },
        other => other,
    }
}
