//! Collaborator ports.
//!
//! The engine never talks to the network itself. Station and booking data
//! come from a [`BookingApi`], and rescheduled bookings are handed to a
//! [`BookingPersister`].

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Booking, BookingUpdate, Station};

/// Read access to the stations/bookings backend.
///
/// Implementations map non-success responses to
/// [`StationCalError::Fetch`](crate::StationCalError::Fetch) and transport
/// failures to [`StationCalError::Network`](crate::StationCalError::Network),
/// tagged with the matching [`Operation`](crate::Operation).
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// Stations whose name matches `search`. An empty search matches all.
    async fn get_stations(&self, search: &str) -> Result<Vec<Station>>;

    /// Bookings for a station. Empty `start_date`/`end_date` mean no filter.
    async fn get_bookings(
        &self,
        station_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Booking>>;

    /// A single booking.
    async fn get_booking_details(&self, station_id: &str, booking_id: &str) -> Result<Booking>;
}

/// Write side for rescheduled bookings.
#[async_trait]
pub trait BookingPersister: Send + Sync {
    async fn persist_booking(&self, update: &BookingUpdate) -> Result<()>;
}

/// Persister that only records the update in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingPersister;

#[async_trait]
impl BookingPersister for LoggingPersister {
    async fn persist_booking(&self, update: &BookingUpdate) -> Result<()> {
        tracing::info!(
            booking_id = %update.booking_id,
            updated_start_date = %update.updated_start_date,
            updated_end_date = %update.updated_end_date,
            "booking update (not sent to any backend)"
        );
        Ok(())
    }
}

#[async_trait]
impl<T: BookingApi + ?Sized> BookingApi for Box<T> {
    async fn get_stations(&self, search: &str) -> Result<Vec<Station>> {
        (**self).get_stations(search).await
    }

    async fn get_bookings(
        &self,
        station_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Booking>> {
        (**self).get_bookings(station_id, start_date, end_date).await
    }

    async fn get_booking_details(&self, station_id: &str, booking_id: &str) -> Result<Booking> {
        (**self).get_booking_details(station_id, booking_id).await
    }
}

#[async_trait]
impl<T: BookingPersister + ?Sized> BookingPersister for Box<T> {
    async fn persist_booking(&self, update: &BookingUpdate) -> Result<()> {
        (**self).persist_booking(update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_instant;

    #[tokio::test]
    async fn logging_persister_always_succeeds() {
        let update = BookingUpdate {
            booking_id: "1".to_string(),
            updated_start_date: parse_instant("2023-05-01").unwrap(),
            updated_end_date: parse_instant("2023-05-03").unwrap(),
        };
        assert!(LoggingPersister.persist_booking(&update).await.is_ok());
    }
}
