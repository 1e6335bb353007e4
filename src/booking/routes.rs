//! HTTP handlers for bookings.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::AppState;

use super::requests::CreateBookingRequest;
use super::responses::{BookingResponse, CreatedBookingResponse};
use super::services;

/// Booking routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/:code", get(get_booking))
}

/// POST /bookings
pub async fn create_booking(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedBookingResponse>)> {
    let Json(request) = payload?;
    let receipt = services::create_booking(
        state.store.as_ref(),
        state.catalog.as_ref(),
        state.bookings.as_ref(),
        &state.cache,
        &request,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(receipt.into())))
}

/// GET /bookings/:code
pub async fn get_booking(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<BookingResponse>> {
    let booking = services::booking_by_code(state.bookings.as_ref(), &code).await?;
    Ok(Json(booking.into()))
}
