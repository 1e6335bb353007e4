//! HTTP handlers for the pricing API.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::AppState;

use super::requests::CalculateRentalPriceRequest;
use super::responses::{CarTypeResponse, DestinationResponse, RentalPriceResponse};
use super::services;

/// Pricing routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate-rental-price", post(calculate_rental_price))
        .route("/destinations", get(list_destinations))
        .route("/car-types", get(list_car_types))
}

/// POST /calculate-rental-price
pub async fn calculate_rental_price(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CalculateRentalPriceRequest>, JsonRejection>,
) -> Result<Json<RentalPriceResponse>> {
    let Json(request) = payload?;
    let result =
        services::calculate_rental_price(state.store.as_ref(), &state.cache, &request).await?;
    Ok(Json(result.into()))
}

/// GET /destinations
pub async fn list_destinations(
    State(state): State<AppState>,
) -> Result<Json<Vec<DestinationResponse>>> {
    let destinations = services::list_destinations(state.store.as_ref()).await?;
    Ok(Json(destinations.into_iter().map(Into::into).collect()))
}

/// GET /car-types
pub async fn list_car_types(State(state): State<AppState>) -> Result<Json<Vec<CarTypeResponse>>> {
    let car_types = services::list_car_types(state.store.as_ref()).await?;
    Ok(Json(car_types.into_iter().map(Into::into).collect()))
}
