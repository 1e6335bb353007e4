//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::PricingError;
use super::resolver::{CarProfile, TripLeg};
use super::settings::PricingConfig;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Round to specified decimal places, halves away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use car_rental_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to a whole currency amount. Negative amounts clamp to zero.
///
/// Fails when the rounded amount does not fit an `i64`.
pub fn to_whole_amount(amount: Decimal) -> Result<i64, PricingError> {
    round_money(amount, 0)
        .max(Decimal::ZERO)
        .to_i64()
        .ok_or_else(PricingError::out_of_range)
}

fn checked_mul(a: Decimal, b: Decimal) -> Result<Decimal, PricingError> {
    a.checked_mul(b).ok_or_else(PricingError::out_of_range)
}

fn checked_add(a: Decimal, b: Decimal) -> Result<Decimal, PricingError> {
    a.checked_add(b).ok_or_else(PricingError::out_of_range)
}

/// Parse a rental date.
///
/// Calendar dates (`YYYY-MM-DD`) are read as midnight UTC; RFC 3339
/// timestamps are also accepted.
pub fn parse_rental_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Billable days and nights of a rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalDuration {
    pub days: i64,
    pub nights: i64,
}

impl RentalDuration {
    /// Days between two instants, any partial day rounded up, at least one.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, PricingError> {
        if end < start {
            return Err(PricingError::validation("Invalid date range."));
        }
        let seconds = (end - start).num_seconds();
        let days = ((seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY).max(1);
        Ok(Self {
            days,
            nights: (days - 1).max(0),
        })
    }
}

/// Parse both dates and compute the rental duration.
pub fn rental_duration(start_date: &str, end_date: &str) -> Result<RentalDuration, PricingError> {
    let start = parse_rental_date(start_date);
    let end = parse_rental_date(end_date);
    match (start, end) {
        (Some(start), Some(end)) => RentalDuration::between(start, end),
        _ => Err(PricingError::validation("Invalid date range.")),
    }
}

/// Unrounded cost components of a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct CostComponents {
    pub car_rental_base_cost: Decimal,
    pub driver_daily_fee: Decimal,
    pub overnight_fee: Decimal,
    pub fuel_cost: Decimal,
    pub toll_fee: Decimal,
}

impl CostComponents {
    pub fn total(&self) -> Result<Decimal, PricingError> {
        [
            self.driver_daily_fee,
            self.overnight_fee,
            self.fuel_cost,
            self.toll_fee,
        ]
        .into_iter()
        .try_fold(self.car_rental_base_cost, checked_add)
    }
}

/// Itemized costs, each rounded on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub car_rental_base_cost: i64,
    pub driver_daily_fee: i64,
    pub overnight_fee: i64,
    pub fuel_cost: i64,
    pub toll_fee: i64,
}

impl TryFrom<&CostComponents> for PriceBreakdown {
    type Error = PricingError;

    fn try_from(c: &CostComponents) -> Result<Self, Self::Error> {
        Ok(Self {
            car_rental_base_cost: to_whole_amount(c.car_rental_base_cost)?,
            driver_daily_fee: to_whole_amount(c.driver_daily_fee)?,
            overnight_fee: to_whole_amount(c.overnight_fee)?,
            fuel_cost: to_whole_amount(c.fuel_cost)?,
            toll_fee: to_whole_amount(c.toll_fee)?,
        })
    }
}

/// A priced rental quote.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub total_price: i64,
    pub duration: RentalDuration,
    pub breakdown: PriceBreakdown,
    /// Driver fee as a share of the car rent plus overnight fees. Informational
    /// only; it is not part of `total_price`.
    pub detailed_driver_fee: i64,
}

/// Fuel for the round trip: (2 x one-way km / 100) x L/100km x price per litre.
pub fn fuel_cost(
    distance_one_way_km: Decimal,
    consumption_per_100km: Decimal,
    fuel_price: Decimal,
) -> Result<Decimal, PricingError> {
    let round_trip_hundreds = checked_mul(distance_one_way_km, dec!(2))? / dec!(100);
    checked_mul(checked_mul(round_trip_hundreds, consumption_per_100km)?, fuel_price)
}

pub fn cost_components(
    config: &PricingConfig,
    leg: &TripLeg,
    car: &CarProfile,
    duration: RentalDuration,
) -> Result<CostComponents, PricingError> {
    let days = Decimal::from(duration.days);
    let nights = Decimal::from(duration.nights);

    Ok(CostComponents {
        car_rental_base_cost: checked_mul(car.base_daily_rate, days)?,
        driver_daily_fee: checked_mul(config.driver_daily_fee, days)?,
        overnight_fee: checked_mul(config.overnight_fee_per_night, nights)?,
        fuel_cost: fuel_cost(
            leg.distance_one_way_km,
            car.fuel_consumption_per_100km,
            config.fuel_price_per_liter,
        )?,
        toll_fee: checked_mul(leg.toll_fee_one_way, dec!(2))?,
    })
}

/// Apply the pricing formula.
///
/// # Errors
/// `OutOfRange` when any amount overflows `Decimal` or a whole `i64`.
pub fn compose_quote(
    config: &PricingConfig,
    leg: &TripLeg,
    car: &CarProfile,
    duration: RentalDuration,
) -> Result<PriceQuote, PricingError> {
    let components = cost_components(config, leg, car, duration)?;
    let detailed_driver_fee = checked_add(
        checked_mul(components.car_rental_base_cost, config.driver_fee_percentage)?,
        components.overnight_fee,
    )?;

    Ok(PriceQuote {
        total_price: to_whole_amount(components.total()?)?,
        duration,
        breakdown: PriceBreakdown::try_from(&components)?,
        detailed_driver_fee: to_whole_amount(detailed_driver_fee)?,
    })
}
