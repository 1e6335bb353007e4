//! Database models for the car catalog.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Car as shown in listings
#[derive(Debug, Clone, FromRow)]
pub struct CarSummary {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub price_per_day: Decimal,
    pub image_url: Option<String>,
    pub brand: Option<String>,
    pub car_type: Option<String>,
    pub seats: Option<i32>,
    pub transmission: Option<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Full car record for the detail page
#[derive(Debug, Clone, FromRow)]
pub struct CarDetail {
    #[sqlx(flatten)]
    pub summary: CarSummary,
    pub description: Option<String>,
    pub fuel_type: Option<String>,
    pub location: Option<String>,
    pub features: Vec<String>,
}

/// One page of a car listing plus the number of matching cars
#[derive(Debug, Clone)]
pub struct CarPage {
    pub cars: Vec<CarSummary>,
    pub total: i64,
}

/// Distinct brands and types of available cars
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarFilterOptions {
    pub brands: Vec<String>,
    pub types: Vec<String>,
}
