//! HTTP client tests against a local mock server
//!
//! Verifies URL shapes, query parameters, bearer auth, and response handling
//! of the reqwest-backed booking API.

#![cfg(feature = "http-client")]

use venue_booking_flow::{
    AccessToken, ApiConfig, BookingApi, BookingError, BookingRequest, CapacityBand,
    HttpBookingApi, PaymentMethod, VenueQuery, VenueSort, CASH_PAYMENT_TRX_ID,
};

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpBookingApi {
    HttpBookingApi::new(ApiConfig {
        base_url: format!("{}/api", server.uri()),
        timeout_seconds: 5,
    })
    .expect("Failed to build HTTP client")
}

fn test_request() -> BookingRequest {
    BookingRequest {
        venue_id: 3,
        event_date: NaiveDate::from_ymd_opt(2026, 10, 1).expect("valid date"),
        slot: "Full Day".to_string(),
        event_type: "Wedding".to_string(),
        special_requirements: "Services: Catering Service".to_string(),
        fullname: "Ali Khan".to_string(),
        email: "ali@example.com".to_string(),
        phone_primary: "+92-300-1234567".to_string(),
        facility_ids: Vec::new(),
        amount: dec!(210000),
        payment_method: PaymentMethod::Cash,
        trx_id: CASH_PAYMENT_TRX_ID.to_string(),
    }
}

#[cfg(test)]
mod availability_endpoint_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_availability_parses_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/venues/3/availability"))
            .and(query_param("date", "2026-10-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "availability": [
                    { "slot": "Full Day", "is_available": false },
                    { "slot": "9:00 AM - 12:00 PM", "is_available": true }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server);
        let slots = api
            .fetch_availability(3, NaiveDate::from_ymd_opt(2026, 10, 1).expect("valid date"))
            .await
            .expect("fetch failed");

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].slot, "Full Day");
        assert!(!slots[0].is_available);
        assert!(slots[1].is_available);
    }

    #[tokio::test]
    async fn test_empty_envelope_yields_no_slots() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/venues/3/availability"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let slots = api
            .fetch_availability(3, NaiveDate::from_ymd_opt(2026, 10, 1).expect("valid date"))
            .await
            .expect("fetch failed");

        assert!(slots.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_maps_to_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/venues/3/availability"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let err = api
            .fetch_availability(3, NaiveDate::from_ymd_opt(2026, 10, 1).expect("valid date"))
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::NetworkError { .. }));
        assert!(err.is_retryable());
    }
}

#[cfg(test)]
mod booking_endpoint_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_booking_posts_bearer_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/bookings"))
            .and(header("authorization", "Bearer tok_live_1"))
            .and(body_partial_json(json!({
                "venue_id": 3,
                "event_date": "2026-10-01",
                "slot": "Full Day",
                "event_type": "Wedding",
                "fullname": "Ali Khan",
                "phone_primary": "+92-300-1234567",
                "payment_method": "cash",
                "trx_id": "CASH-PAYMENT",
                "facility_ids": []
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "booking_id": "BK-2026-1042",
                "status": "pending"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server);
        let confirmation = api
            .create_booking(&test_request(), &AccessToken::new("tok_live_1"))
            .await
            .expect("booking failed");

        assert_eq!(confirmation.booking_id.as_deref(), Some("BK-2026-1042"));
        assert_eq!(confirmation.status.as_deref(), Some("pending"));
    }

    #[tokio::test]
    async fn test_rejection_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/bookings"))
            .respond_with(
                ResponseTemplate::new(422).set_body_string("Slot already booked for this date"),
            )
            .mount(&server)
            .await;

        let api = api_for(&server);
        let err = api
            .create_booking(&test_request(), &AccessToken::new("tok_live_1"))
            .await
            .unwrap_err();

        match err {
            BookingError::SubmissionRejected { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "Slot already booked for this date");
            }
            other => panic!("expected SubmissionRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_network() {
        let server = MockServer::start().await;
        // no mocks mounted: any request would 404 and fail differently

        let api = api_for(&server);
        let mut request = test_request();
        request.email = "not-an-email".to_string();

        let err = api
            .create_booking(&request, &AccessToken::new("tok_live_1"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::ValidationError { .. }));
    }
}

#[cfg(test)]
mod venue_endpoint_tests {
    use super::*;

    #[tokio::test]
    async fn test_search_sends_filter_pairs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/venues"))
            .and(query_param("city", "Lahore"))
            .and(query_param("capacity_min", "100"))
            .and(query_param("capacity_max", "300"))
            .and(query_param("sort_by", "price"))
            .and(query_param("sort_order", "asc"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "venues": [
                    { "id": 3, "name": "Grand Palace", "city": "Lahore", "capacity": 250, "base_price": 150000, "rating": 4.5 }
                ],
                "total_venues": 13,
                "total_pages": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut query = VenueQuery::new();
        query.city = Some("Lahore".to_string());
        query.capacity = Some(CapacityBand::Between(100, 300));
        query.sort = Some(VenueSort::PriceAscending);
        query.page = Some(2);

        let api = api_for(&server);
        let listing = api.search_venues(&query).await.expect("search failed");

        assert_eq!(listing.venues.len(), 1);
        assert_eq!(listing.venues[0].name, "Grand Palace");
        assert_eq!(listing.venues[0].base_price, Some(dec!(150000)));
        assert_eq!(listing.total_venues, 13);
        assert_eq!(listing.total_pages, 2);
    }

    #[tokio::test]
    async fn test_search_failure_maps_to_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/venues"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let err = api.search_venues(&VenueQuery::new()).await.unwrap_err();
        assert!(matches!(err, BookingError::NetworkError { .. }));
    }
}
