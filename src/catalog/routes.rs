//! HTTP handlers for the car catalog.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::AppState;

use super::requests::{CarListQuery, FeaturedQuery};
use super::responses::{
    CarDetailResponse, CarListResponse, CarSummaryResponse, FilterOptionsResponse,
};
use super::services;

/// Catalog routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cars", get(list_cars))
        .route("/cars/featured", get(featured_cars))
        .route("/cars/filter-options", get(filter_options))
        .route("/cars/:slug", get(car_detail))
}

/// GET /cars
pub async fn list_cars(
    State(state): State<AppState>,
    query: std::result::Result<Query<CarListQuery>, QueryRejection>,
) -> Result<Json<CarListResponse>> {
    let Query(query) = query?;
    let listing = services::list_cars(state.catalog.as_ref(), &query).await?;
    Ok(Json(listing.into()))
}

/// GET /cars/featured
pub async fn featured_cars(
    State(state): State<AppState>,
    query: std::result::Result<Query<FeaturedQuery>, QueryRejection>,
) -> Result<Json<Vec<CarSummaryResponse>>> {
    let Query(query) = query?;
    let cars = services::featured_cars(state.catalog.as_ref(), &query).await?;
    Ok(Json(cars.into_iter().map(Into::into).collect()))
}

/// GET /cars/filter-options
pub async fn filter_options(State(state): State<AppState>) -> Result<Json<FilterOptionsResponse>> {
    let options = services::filter_options(state.catalog.as_ref()).await?;
    Ok(Json(options.into()))
}

/// GET /cars/:slug
pub async fn car_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CarDetailResponse>> {
    let car = services::car_detail(state.catalog.as_ref(), &slug).await?;
    Ok(Json(car.into()))
}
