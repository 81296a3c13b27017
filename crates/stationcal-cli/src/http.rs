use async_trait::async_trait;
use serde::de::DeserializeOwned;
use stationcal_core::{Booking, BookingApi, Operation, Result, Station, StationCalError};
use tracing::debug;

/// Stations/bookings API over HTTP.
pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%operation, %url, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| StationCalError::Network {
                operation,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StationCalError::Fetch {
                operation,
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| StationCalError::Network {
            operation,
            message: format!("invalid response body: {}", e),
        })
    }
}

#[async_trait]
impl BookingApi for HttpApi {
    async fn get_stations(&self, search: &str) -> Result<Vec<Station>> {
        self.get_json(Operation::FetchStations, "stations", &[("search", search)])
            .await
    }

    async fn get_bookings(
        &self,
        station_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Booking>> {
        let path = format!("stations/{}/bookings", station_id);
        self.get_json(
            Operation::FetchBookings,
            &path,
            &[("startDate", start_date), ("endDate", end_date)],
        )
        .await
    }

    async fn get_booking_details(&self, station_id: &str, booking_id: &str) -> Result<Booking> {
        let path = format!("stations/{}/bookings/{}", station_id, booking_id);
        match self
            .get_json(Operation::FetchBookingDetails, &path, &[])
            .await
        {
            Err(StationCalError::Fetch { status: 404, .. }) => Err(StationCalError::NotFound {
                station_id: station_id.to_string(),
                booking_id: booking_id.to_string(),
            }),
            other => other,
        }
    }
}
