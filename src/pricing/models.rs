//! Database models for pricing queries.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.

use rust_decimal::Decimal;
use sqlx::FromRow;

/// Setting row from app_settings
#[derive(Debug, Clone, FromRow)]
pub struct AppSetting {
    pub setting_key: String,
    pub setting_value: String,
}

impl AppSetting {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            setting_key: key.into(),
            setting_value: value.into(),
        }
    }
}

/// Destination from destinations
#[derive(Debug, Clone, FromRow)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub distance_km: Decimal,
    pub toll_fee_one_way: Decimal,
}

/// Car type pricing profile from car_types
#[derive(Debug, Clone, FromRow)]
pub struct CarTypeInfo {
    pub id: String,
    pub name: String,
    pub base_daily_rate: Decimal,
    pub fuel_consumption_l_per_100km: Decimal,
}
