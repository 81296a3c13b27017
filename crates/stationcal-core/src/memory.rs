//! In-memory stations/bookings backend.
//!
//! [`MemoryApi`] serves a fixed data set, e.g. one loaded from a JSON
//! fixture:
//!
//! ```json
//! {
//!   "stations": [{ "id": "1", "name": "Berlin Station" }],
//!   "bookings": { "1": [ { "id": "1", "customerName": "John Doe", ... } ] }
//! }
//! ```
//!
//! It counts calls per operation and can be told to fail one operation
//! with a status code. As a persister it accepts updates without storing
//! them anywhere.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::Deserialize;

use crate::api::{BookingApi, BookingPersister};
use crate::error::{Operation, Result, StationCalError};
use crate::models::{Booking, BookingUpdate, Station};

#[derive(Debug, Default, Deserialize)]
pub struct MemoryApi {
    #[serde(default)]
    stations: Vec<Station>,
    /// Bookings keyed by station id.
    #[serde(default)]
    bookings: HashMap<String, Vec<Booking>>,
    #[serde(skip)]
    failure: Option<(Operation, u16)>,
    #[serde(skip)]
    station_calls: AtomicUsize,
    #[serde(skip)]
    booking_calls: AtomicUsize,
    #[serde(skip)]
    detail_calls: AtomicUsize,
    #[serde(skip)]
    persist_calls: AtomicUsize,
    /// Station ids of booking fetches, in call order.
    #[serde(skip)]
    booking_fetches: Mutex<Vec<String>>,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_station(mut self, station: Station, bookings: Vec<Booking>) -> Self {
        self.bookings.insert(station.id.clone(), bookings);
        self.stations.push(station);
        self
    }

    /// Answer every call of `operation` with HTTP `status`.
    pub fn with_failure(mut self, operation: Operation, status: u16) -> Self {
        self.failure = Some((operation, status));
        self
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// How many times `operation` was called.
    pub fn calls(&self, operation: Operation) -> usize {
        self.counter(operation).load(Ordering::SeqCst)
    }

    /// Station ids that bookings were fetched for, oldest first.
    pub fn booking_fetches(&self) -> Vec<String> {
        self.booking_fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn counter(&self, operation: Operation) -> &AtomicUsize {
        match operation {
            Operation::FetchStations => &self.station_calls,
            Operation::FetchBookings => &self.booking_calls,
            Operation::FetchBookingDetails => &self.detail_calls,
            Operation::PersistBooking => &self.persist_calls,
        }
    }

    fn enter(&self, operation: Operation) -> Result<()> {
        self.counter(operation).fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some((failing, status)) if failing == operation => {
                Err(StationCalError::Fetch { operation, status })
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl BookingApi for MemoryApi {
    async fn get_stations(&self, search: &str) -> Result<Vec<Station>> {
        self.enter(Operation::FetchStations)?;
        let needle = search.trim().to_lowercase();
        Ok(self
            .stations
            .iter()
            .filter(|station| needle.is_empty() || station.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn get_bookings(
        &self,
        station_id: &str,
        _start_date: &str,
        _end_date: &str,
    ) -> Result<Vec<Booking>> {
        self.booking_fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(station_id.to_string());
        self.enter(Operation::FetchBookings)?;
        Ok(self.bookings.get(station_id).cloned().unwrap_or_default())
    }

    async fn get_booking_details(&self, station_id: &str, booking_id: &str) -> Result<Booking> {
        self.enter(Operation::FetchBookingDetails)?;
        self.bookings
            .get(station_id)
            .and_then(|bookings| bookings.iter().find(|b| b.id == booking_id))
            .cloned()
            .ok_or_else(|| StationCalError::NotFound {
                station_id: station_id.to_string(),
                booking_id: booking_id.to_string(),
            })
    }
}

#[async_trait]
impl BookingPersister for MemoryApi {
    async fn persist_booking(&self, update: &BookingUpdate) -> Result<()> {
        self.enter(Operation::PersistBooking)?;
        tracing::debug!(booking_id = %update.booking_id, "accepted booking update");
        Ok(())
    }
}
