//! Response DTOs for catalog endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::models::{CarDetail, CarFilterOptions, CarSummary};
use super::services::CarListing;

/// Car card in listings
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSummaryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_per_day: Decimal,
    pub image_url: Option<String>,
    pub brand: Option<String>,
    #[serde(rename = "type")]
    pub car_type: Option<String>,
    pub seats: Option<i32>,
    pub transmission: Option<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

impl From<CarSummary> for CarSummaryResponse {
    fn from(car: CarSummary) -> Self {
        Self {
            id: car.id,
            name: car.name,
            slug: car.slug,
            price_per_day: car.price_per_day,
            image_url: car.image_url,
            brand: car.brand,
            car_type: car.car_type,
            seats: car.seats,
            transmission: car.transmission,
            is_featured: car.is_featured,
            created_at: car.created_at,
        }
    }
}

/// Car detail page
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDetailResponse {
    #[serde(flatten)]
    pub summary: CarSummaryResponse,
    pub description: Option<String>,
    pub fuel_type: Option<String>,
    pub location: Option<String>,
    pub features: Vec<String>,
}

impl From<CarDetail> for CarDetailResponse {
    fn from(car: CarDetail) -> Self {
        Self {
            summary: car.summary.into(),
            description: car.description,
            fuel_type: car.fuel_type,
            location: car.location,
            features: car.features,
        }
    }
}

/// One page of the car listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarListResponse {
    pub cars: Vec<CarSummaryResponse>,
    pub total: i64,
    pub page: i64,
    pub items_per_page: i64,
    pub total_pages: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl From<CarListing> for CarListResponse {
    fn from(listing: CarListing) -> Self {
        let total_pages = listing.total_pages();
        Self {
            cars: listing.cars.into_iter().map(Into::into).collect(),
            total: listing.total,
            page: listing.page,
            items_per_page: listing.items_per_page,
            total_pages,
            has_previous: listing.page > 1,
            has_next: listing.page < total_pages,
        }
    }
}

/// Choices for the listing filters
#[derive(Debug, Serialize)]
pub struct FilterOptionsResponse {
    pub brands: Vec<String>,
    pub types: Vec<String>,
}

impl From<CarFilterOptions> for FilterOptionsResponse {
    fn from(options: CarFilterOptions) -> Self {
        Self {
            brands: options.brands,
            types: options.types,
        }
    }
}
