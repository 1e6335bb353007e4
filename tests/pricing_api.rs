//! Router tests for the pricing API
//!
//! These drive the full axum router, middleware included, against an
//! in-memory store.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;

use car_rental_pricing::booking::InMemoryBookingStore;
use car_rental_pricing::cache::PricingCache;
use car_rental_pricing::catalog::InMemoryCatalogStore;
use car_rental_pricing::pricing::models::{CarTypeInfo, Destination};
use car_rental_pricing::pricing::InMemoryPricingStore;
use car_rental_pricing::{app, AppState};

// =============================================================================
// Helpers
// =============================================================================

fn store() -> InMemoryPricingStore {
    InMemoryPricingStore::new()
        .with_setting("fuel_price_ron95", "20000")
        .with_setting("overnight_fee_per_night", "300000")
        .with_setting("driver_daily_fee", "500000")
        .with_setting("driver_fee_percentage_on_car_rent", "0.20")
        .with_destination(Destination {
            id: "1".to_string(),
            name: "Sa Pa".to_string(),
            distance_km: dec!(100),
            toll_fee_one_way: dec!(50000),
        })
        .with_destination(Destination {
            id: "2".to_string(),
            name: "Ha Long".to_string(),
            distance_km: dec!(0),
            toll_fee_one_way: dec!(0),
        })
        .with_car_type(CarTypeInfo {
            id: "45".to_string(),
            name: "45 seats".to_string(),
            base_daily_rate: dec!(3500000),
            fuel_consumption_l_per_100km: dec!(22.5),
        })
}

fn router_with(store: InMemoryPricingStore) -> Router {
    let state = AppState::new(
        Arc::new(store),
        Arc::new(InMemoryCatalogStore::new()),
        Arc::new(InMemoryBookingStore::new()),
        PricingCache::default(),
    );
    app(state, Duration::from_secs(5))
}

async fn post_json(router: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/calculate-rental-price")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

// =============================================================================
// Successful quotes
// =============================================================================

mod quote_tests {
    use super::*;

    #[tokio::test]
    async fn test_two_day_trip_with_default_car() {
        let (status, body) = post_json(
            router_with(store()),
            json!({"destinationId": "1", "startDate": "2024-05-01", "endDate": "2024-05-03"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalPrice"], 4_480_000);
        assert_eq!(body["rentalDays"], 2);
        assert_eq!(body["rentalNights"], 1);
        assert_eq!(body["breakdown"]["carRentalBaseCost"], 2_600_000);
        assert_eq!(body["breakdown"]["driverDailyFee"], 1_000_000);
        assert_eq!(body["breakdown"]["overnightFee"], 300_000);
        assert_eq!(body["breakdown"]["fuelCost"], 480_000);
        assert_eq!(body["breakdown"]["tollFee"], 100_000);
        assert_eq!(body["detailedDriverFee"], 820_000);

        let params = &body["parametersUsed"];
        assert_eq!(params["fuelPrice"], 20000.0);
        assert_eq!(params["driverFeePercentage"], 0.2);
        assert_eq!(params["distanceOneWayKm"], 100.0);
        assert_eq!(params["carBaseDailyRate"], 1300000.0);
        assert_eq!(params["carFuelConsumption"], 12.0);
        assert_eq!(params["carTypeDefaulted"], true);
        assert_eq!(params["startDate"], "2024-05-01");
        assert_eq!(params["endDate"], "2024-05-03");
    }

    #[tokio::test]
    async fn test_unknown_car_type_falls_back_to_defaults() {
        let with_default = post_json(
            router_with(store()),
            json!({"destinationId": "1", "startDate": "2024-05-01", "endDate": "2024-05-03"}),
        )
        .await;
        let with_unknown = post_json(
            router_with(store()),
            json!({
                "destinationId": "1",
                "carTypeId": "999",
                "startDate": "2024-05-01",
                "endDate": "2024-05-03"
            }),
        )
        .await;

        assert_eq!(with_unknown.0, StatusCode::OK);
        assert_eq!(with_unknown.1, with_default.1);
    }

    #[tokio::test]
    async fn test_known_car_type_and_numeric_destination_id() {
        let (status, body) = post_json(
            router_with(store()),
            json!({"destinationId": 1, "carTypeId": "45", "startDate": "2024-05-01", "endDate": "2024-05-01"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rentalDays"], 1);
        assert_eq!(body["rentalNights"], 0);
        assert_eq!(body["breakdown"]["overnightFee"], 0);
        // (200 / 100) * 22.5 * 20000
        assert_eq!(body["breakdown"]["fuelCost"], 900_000);
        assert_eq!(body["breakdown"]["carRentalBaseCost"], 3_500_000);
        assert_eq!(body["parametersUsed"]["carTypeDefaulted"], false);
    }

    #[tokio::test]
    async fn test_zero_distance_destination_has_no_fuel_or_toll() {
        let (status, body) = post_json(
            router_with(store()),
            json!({"destinationId": "2", "startDate": "2024-05-01", "endDate": "2024-05-02"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["breakdown"]["fuelCost"], 0);
        assert_eq!(body["breakdown"]["tollFee"], 0);
        assert_eq!(body["totalPrice"], 1_300_000 + 500_000);
    }
}

// =============================================================================
// Error responses
// =============================================================================

mod error_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_dates_returns_400() {
        let (status, body) = post_json(router_with(store()), json!({"destinationId": "1"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Start date and end date are required.");
    }

    #[tokio::test]
    async fn test_missing_destination_returns_400() {
        let (status, body) = post_json(
            router_with(store()),
            json!({"startDate": "2024-05-01", "endDate": "2024-05-03"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Destination ID is required.");
    }

    #[tokio::test]
    async fn test_inverted_dates_returns_400() {
        let (status, body) = post_json(
            router_with(store()),
            json!({"destinationId": "1", "startDate": "2024-05-03", "endDate": "2024-05-01"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid date range.");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/calculate-rental-price")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(router_with(store()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_destination_returns_404() {
        let (status, body) = post_json(
            router_with(store()),
            json!({"destinationId": "77", "startDate": "2024-05-01", "endDate": "2024-05-03"}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Destination not found or invalid.");
    }

    #[tokio::test]
    async fn test_unavailable_store_returns_500() {
        let (status, body) = post_json(
            router_with(store().unavailable()),
            json!({"destinationId": "1", "startDate": "2024-05-01", "endDate": "2024-05-03"}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().starts_with("Database error"));
    }

    #[tokio::test]
    async fn test_oversized_setting_returns_500_not_a_clamped_total() {
        let store = InMemoryPricingStore::new()
            .with_setting("driver_daily_fee", "1e20")
            .with_destination(Destination {
                id: "1".to_string(),
                name: "Sa Pa".to_string(),
                distance_km: dec!(100),
                toll_fee_one_way: dec!(50000),
            });
        let (status, body) = post_json(
            router_with(store),
            json!({"destinationId": "1", "startDate": "2024-05-01", "endDate": "2024-05-03"}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal error: Pricing parameters out of range.");
    }
}

// =============================================================================
// CORS, reference data and health
// =============================================================================

mod surface_tests {
    use super::*;

    #[tokio::test]
    async fn test_cors_preflight() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/calculate-rental-price")
            .header(header::ORIGIN, "https://rental.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,authorization")
            .body(Body::empty())
            .unwrap();
        let response = router_with(store()).oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    }

    #[tokio::test]
    async fn test_list_destinations_sorted_by_name() {
        let (status, body) = get_json(router_with(store()), "/destinations").await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Ha Long", "Sa Pa"]);
        assert_eq!(body[1]["distanceKm"], 100.0);
        assert_eq!(body[1]["tollFeeOneWay"], 50000.0);
    }

    #[tokio::test]
    async fn test_list_car_types() {
        let (status, body) = get_json(router_with(store()), "/car-types").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "45");
        assert_eq!(body[0]["baseDailyRate"], 3500000.0);
        assert_eq!(body[0]["fuelConsumptionPer100Km"], 22.5);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(router_with(store()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["cache"]["settingsCached"], false);
    }
}
