//! Admin-editable pricing settings.
//!
//! The `app_settings` table stores every value as text. This module turns a
//! snapshot of that table into a typed [`PricingConfig`], substituting defaults
//! for anything missing or unparseable so an unconfigured table still prices.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::models::AppSetting;

pub const FUEL_PRICE_KEY: &str = "fuel_price_ron95";
pub const OVERNIGHT_FEE_KEY: &str = "overnight_fee_per_night";
pub const DRIVER_DAILY_FEE_KEY: &str = "driver_daily_fee";
pub const DRIVER_FEE_PERCENTAGE_KEY: &str = "driver_fee_percentage_on_car_rent";
pub const DEFAULT_CAR_RATE_KEY: &str = "default_car_base_daily_rate";
pub const DEFAULT_CAR_FUEL_KEY: &str = "default_car_fuel_consumption";

/// Look up a numeric setting, falling back to `default`.
///
/// Accepts plain and scientific notation. A missing key, an empty value or a
/// value that is not a number all yield `default`.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use car_rental_pricing::pricing::models::AppSetting;
/// use car_rental_pricing::pricing::settings::get_setting;
///
/// let settings = vec![AppSetting::new("fuel_price_ron95", "21500")];
/// assert_eq!(get_setting(&settings, "fuel_price_ron95", dec!(20000)), dec!(21500));
/// assert_eq!(get_setting(&settings, "driver_daily_fee", dec!(500000)), dec!(500000));
/// ```
pub fn get_setting(settings: &[AppSetting], key: &str, default: Decimal) -> Decimal {
    settings
        .iter()
        .find(|s| s.setting_key == key)
        .and_then(|s| parse_number(&s.setting_value))
        .unwrap_or(default)
}

fn parse_number(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Typed pricing parameters resolved from the settings table.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    pub fuel_price_per_liter: Decimal,
    pub overnight_fee_per_night: Decimal,
    pub driver_daily_fee: Decimal,
    /// Fraction of the car rental base cost, e.g. 0.20
    pub driver_fee_percentage: Decimal,
    pub default_base_daily_rate: Decimal,
    pub default_fuel_consumption_per_100km: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            fuel_price_per_liter: dec!(20000),
            overnight_fee_per_night: dec!(300000),
            driver_daily_fee: dec!(500000),
            driver_fee_percentage: dec!(0.20),
            default_base_daily_rate: dec!(1300000),
            default_fuel_consumption_per_100km: dec!(12),
        }
    }
}

impl PricingConfig {
    /// Build a config from a settings snapshot.
    pub fn from_settings(settings: &[AppSetting]) -> Self {
        let defaults = Self::default();
        Self {
            fuel_price_per_liter: get_setting(
                settings,
                FUEL_PRICE_KEY,
                defaults.fuel_price_per_liter,
            ),
            overnight_fee_per_night: get_setting(
                settings,
                OVERNIGHT_FEE_KEY,
                defaults.overnight_fee_per_night,
            ),
            driver_daily_fee: get_setting(settings, DRIVER_DAILY_FEE_KEY, defaults.driver_daily_fee),
            driver_fee_percentage: get_setting(
                settings,
                DRIVER_FEE_PERCENTAGE_KEY,
                defaults.driver_fee_percentage,
            ),
            default_base_daily_rate: get_setting(
                settings,
                DEFAULT_CAR_RATE_KEY,
                defaults.default_base_daily_rate,
            ),
            default_fuel_consumption_per_100km: get_setting(
                settings,
                DEFAULT_CAR_FUEL_KEY,
                defaults.default_fuel_consumption_per_100km,
            ),
        }
    }
}
