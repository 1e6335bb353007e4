//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::PriceBreakdown;
use super::models::{CarTypeInfo, Destination};
use super::services::RentalPriceResult;

/// Response for rental price calculation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalPriceResponse {
    pub total_price: i64,
    pub rental_days: i64,
    pub rental_nights: i64,
    pub breakdown: BreakdownResponse,
    pub detailed_driver_fee: i64,
    pub parameters_used: ParametersUsed,
}

/// Itemized costs, each rounded independently
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownResponse {
    pub car_rental_base_cost: i64,
    pub driver_daily_fee: i64,
    pub overnight_fee: i64,
    pub fuel_cost: i64,
    pub toll_fee: i64,
}

impl From<PriceBreakdown> for BreakdownResponse {
    fn from(b: PriceBreakdown) -> Self {
        Self {
            car_rental_base_cost: b.car_rental_base_cost,
            driver_daily_fee: b.driver_daily_fee,
            overnight_fee: b.overnight_fee,
            fuel_cost: b.fuel_cost,
            toll_fee: b.toll_fee,
        }
    }
}

/// Echo of every rate and input the quote was computed from
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParametersUsed {
    #[serde(with = "rust_decimal::serde::float")]
    pub fuel_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub overnight_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub driver_daily_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub driver_fee_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub distance_one_way_km: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub toll_fee_one_way: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub car_base_daily_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub car_fuel_consumption: Decimal,
    /// True when the car rates came from the default settings
    pub car_type_defaulted: bool,
    pub start_date: String,
    pub end_date: String,
}

impl From<RentalPriceResult> for RentalPriceResponse {
    fn from(result: RentalPriceResult) -> Self {
        let RentalPriceResult {
            quote,
            config,
            leg,
            car,
            start_date,
            end_date,
        } = result;
        let car_type_defaulted = car.is_defaulted();
        let (car_base_daily_rate, car_fuel_consumption) = car
            .value()
            .map(|c| (c.base_daily_rate, c.fuel_consumption_per_100km))
            .unwrap_or((
                config.default_base_daily_rate,
                config.default_fuel_consumption_per_100km,
            ));

        Self {
            total_price: quote.total_price,
            rental_days: quote.duration.days,
            rental_nights: quote.duration.nights,
            breakdown: quote.breakdown.into(),
            detailed_driver_fee: quote.detailed_driver_fee,
            parameters_used: ParametersUsed {
                fuel_price: config.fuel_price_per_liter,
                overnight_fee: config.overnight_fee_per_night,
                driver_daily_fee: config.driver_daily_fee,
                driver_fee_percentage: config.driver_fee_percentage,
                distance_one_way_km: leg.distance_one_way_km,
                toll_fee_one_way: leg.toll_fee_one_way,
                car_base_daily_rate,
                car_fuel_consumption,
                car_type_defaulted,
                start_date,
                end_date,
            },
        }
    }
}

/// Entry of the destinations list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationResponse {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub distance_km: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub toll_fee_one_way: Decimal,
}

/// Entry of the car types list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarTypeResponse {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_daily_rate: Decimal,
    #[serde(rename = "fuelConsumptionPer100Km", with = "rust_decimal::serde::float")]
    pub fuel_consumption_per_100km: Decimal,
}

impl From<Destination> for DestinationResponse {
    fn from(d: Destination) -> Self {
        Self {
            id: d.id,
            name: d.name,
            distance_km: d.distance_km,
            toll_fee_one_way: d.toll_fee_one_way,
        }
    }
}

impl From<CarTypeInfo> for CarTypeResponse {
    fn from(c: CarTypeInfo) -> Self {
        Self {
            id: c.id,
            name: c.name,
            base_daily_rate: c.base_daily_rate,
            fuel_consumption_per_100km: c.fuel_consumption_l_per_100km,
        }
    }
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
