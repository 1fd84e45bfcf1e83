use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;
use validator::Validate;

use crate::error::{BookingError, BookingResult};
use crate::types::{
    AccessToken, BookingConfirmation, BookingRequest, SlotStatus, STANDARD_TIME_SLOTS,
};
use crate::venues::{VenueListing, VenueQuery, VenueSummary};

/// Booking backend seam - the wizard reaches the REST service through this
#[async_trait]
pub trait BookingApi {
    /// Slot availability for a venue on a date
    async fn fetch_availability(
        &self,
        venue_id: u64,
        date: NaiveDate,
    ) -> BookingResult<Vec<SlotStatus>>;

    /// Create a booking, bearer-token authenticated
    async fn create_booking(
        &self,
        request: &BookingRequest,
        token: &AccessToken,
    ) -> BookingResult<BookingConfirmation>;

    /// Search the venue listing with marketplace filters
    async fn search_venues(&self, query: &VenueQuery) -> BookingResult<VenueListing>;
}

/// Backend connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including any path prefix, e.g. `https://api.example.com/api`
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// HTTP implementation of the booking backend
#[cfg(feature = "http-client")]
pub struct HttpBookingApi {
    config: ApiConfig,
    client: reqwest::Client,
}

#[cfg(feature = "http-client")]
impl HttpBookingApi {
    /// Create a client with the configured timeout
    pub fn new(config: ApiConfig) -> BookingResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                BookingError::network_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(feature = "http-client")]
#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn fetch_availability(
        &self,
        venue_id: u64,
        date: NaiveDate,
    ) -> BookingResult<Vec<SlotStatus>> {
        let url = self.url(&format!("venues/{}/availability", venue_id));
        let response = self
            .client
            .get(&url)
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await
            .map_err(|e| BookingError::network_error(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(BookingError::network_error(format!(
                "Availability lookup failed: HTTP {}",
                response.status()
            )));
        }

        #[derive(Deserialize)]
        struct AvailabilityResponse {
            #[serde(default)]
            availability: Vec<SlotStatus>,
        }

        let body: AvailabilityResponse =
            response
                .json()
                .await
                .map_err(|e| BookingError::SerializationError {
                    message: format!("Failed to parse availability response: {}", e),
                })?;

        Ok(body.availability)
    }

    async fn create_booking(
        &self,
        request: &BookingRequest,
        token: &AccessToken,
    ) -> BookingResult<BookingConfirmation> {
        request.validate()?;

        let url = self.url("bookings");
        let response = self
            .client
            .post(&url)
            .bearer_auth(token.as_str())
            .json(request)
            .send()
            .await
            .map_err(|e| BookingError::network_error(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BookingError::submission_rejected(status.as_u16(), message));
        }

        response
            .json()
            .await
            .map_err(|e| BookingError::SerializationError {
                message: format!("Failed to parse booking response: {}", e),
            })
    }

    async fn search_venues(&self, query: &VenueQuery) -> BookingResult<VenueListing> {
        let url = self.url("venues");
        let response = self
            .client
            .get(&url)
            .query(&query.to_query_pairs())
            .send()
            .await
            .map_err(|e| BookingError::network_error(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(BookingError::network_error(format!(
                "Venue search failed: HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| BookingError::SerializationError {
                message: format!("Failed to parse venue listing: {}", e),
            })
    }
}

/// Mock booking backend for development and testing
pub struct MockBookingApi {
    slots: Vec<SlotStatus>,
    venues: Vec<VenueSummary>,
    should_fail: bool,
    delay_ms: Option<u64>,
    created: Mutex<Vec<BookingRequest>>,
}

impl MockBookingApi {
    /// Mock with every standard slot available and no venues
    pub fn new() -> Self {
        let slots = STANDARD_TIME_SLOTS
            .iter()
            .map(|s| SlotStatus {
                slot: s.to_string(),
                is_available: true,
            })
            .collect();

        Self {
            slots,
            venues: Vec::new(),
            should_fail: false,
            delay_ms: None,
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn with_slots(mut self, slots: Vec<SlotStatus>) -> Self {
        self.slots = slots;
        self
    }

    /// Mark one named slot unavailable
    pub fn with_unavailable(mut self, slot: &str) -> Self {
        for status in &mut self.slots {
            if status.slot == slot {
                status.is_available = false;
            }
        }
        self
    }

    pub fn with_venues(mut self, venues: Vec<VenueSummary>) -> Self {
        self.venues = venues;
        self
    }

    pub fn with_failure(mut self, should_fail: bool) -> Self {
        self.should_fail = should_fail;
        self
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Requests accepted so far, in arrival order
    pub fn created_requests(&self) -> Vec<BookingRequest> {
        self.created
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for MockBookingApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingApi for MockBookingApi {
    async fn fetch_availability(
        &self,
        _venue_id: u64,
        _date: NaiveDate,
    ) -> BookingResult<Vec<SlotStatus>> {
        if let Some(delay) = self.delay_ms {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if self.should_fail {
            return Err(BookingError::network_error("Mock availability failure"));
        }

        Ok(self.slots.clone())
    }

    async fn create_booking(
        &self,
        request: &BookingRequest,
        _token: &AccessToken,
    ) -> BookingResult<BookingConfirmation> {
        if let Some(delay) = self.delay_ms {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if self.should_fail {
            return Err(BookingError::submission_rejected(
                500,
                "Mock booking failure",
            ));
        }

        request.validate()?;

        self.created
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        Ok(BookingConfirmation {
            booking_id: Some(format!("BK-{}", Uuid::new_v4())),
            status: Some("pending".to_string()),
            message: Some("Mock booking created".to_string()),
        })
    }

    async fn search_venues(&self, _query: &VenueQuery) -> BookingResult<VenueListing> {
        if let Some(delay) = self.delay_ms {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if self.should_fail {
            return Err(BookingError::network_error("Mock venue search failure"));
        }

        Ok(VenueListing {
            venues: self.venues.clone(),
            total_venues: self.venues.len() as u64,
            total_pages: 1,
        })
    }
}
