//! Trip resolution: destination distance/toll and car pricing profile.
//!
//! The destination is mandatory; a car type is a refinement that degrades to the
//! configured defaults when it cannot be found.

use rust_decimal::Decimal;

use super::error::PricingError;
use super::models::{CarTypeInfo, Destination};
use super::settings::PricingConfig;

/// Outcome of a reference-data lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// The requested row was found.
    Found(T),
    /// Nothing usable was requested or found, defaults were substituted.
    Defaulted(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Lookup::Found(v) | Lookup::Defaulted(v) => Some(v),
            Lookup::NotFound => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Lookup::Found(v) | Lookup::Defaulted(v) => Some(v),
            Lookup::NotFound => None,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Lookup::Defaulted(_))
    }
}

/// Per-day rate and fuel consumption used to price a car.
#[derive(Debug, Clone, PartialEq)]
pub struct CarProfile {
    pub base_daily_rate: Decimal,
    pub fuel_consumption_per_100km: Decimal,
}

impl CarProfile {
    pub fn from_config(config: &PricingConfig) -> Self {
        Self {
            base_daily_rate: config.default_base_daily_rate,
            fuel_consumption_per_100km: config.default_fuel_consumption_per_100km,
        }
    }
}

impl From<&CarTypeInfo> for CarProfile {
    fn from(info: &CarTypeInfo) -> Self {
        Self {
            base_daily_rate: info.base_daily_rate,
            fuel_consumption_per_100km: info.fuel_consumption_l_per_100km,
        }
    }
}

/// Distance and toll of the selected destination.
#[derive(Debug, Clone, PartialEq)]
pub struct TripLeg {
    pub distance_one_way_km: Decimal,
    pub toll_fee_one_way: Decimal,
}

/// Validate and normalize a destination id from a request.
pub fn require_destination_id(destination_id: Option<&str>) -> Result<&str, PricingError> {
    match destination_id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(PricingError::validation("Destination ID is required.")),
    }
}

/// Normalize an optional car type id; blank ids count as absent.
pub fn optional_car_type_id(car_type_id: Option<&str>) -> Option<&str> {
    car_type_id.map(str::trim).filter(|id| !id.is_empty())
}

/// Destinations have no fallback: a miss is `NotFound`.
pub fn lookup_destination(destination: Option<&Destination>) -> Lookup<TripLeg> {
    match destination {
        Some(d) => Lookup::Found(TripLeg {
            distance_one_way_km: d.distance_km,
            toll_fee_one_way: d.toll_fee_one_way,
        }),
        None => Lookup::NotFound,
    }
}

pub fn resolve_destination(destination: Option<&Destination>) -> Result<TripLeg, PricingError> {
    lookup_destination(destination)
        .into_value()
        .ok_or_else(|| PricingError::not_found("Destination not found or invalid."))
}

/// Pick the car profile for a request.
///
/// `requested` is the car type id the caller asked for, `found` the row the
/// store returned for it.
pub fn resolve_car_profile(
    requested: Option<&str>,
    found: Option<&CarTypeInfo>,
    config: &PricingConfig,
) -> Lookup<CarProfile> {
    match (requested, found) {
        (Some(_), Some(info)) => Lookup::Found(CarProfile::from(info)),
        (Some(id), None) => {
            tracing::warn!("Car type with ID {} not found, using default rates.", id);
            Lookup::Defaulted(CarProfile::from_config(config))
        }
        (None, _) => Lookup::Defaulted(CarProfile::from_config(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn car_type() -> CarTypeInfo {
        CarTypeInfo {
            id: "limo".to_string(),
            name: "Limousine 9 seats".to_string(),
            base_daily_rate: dec!(2500000),
            fuel_consumption_l_per_100km: dec!(14),
        }
    }

    #[test]
    fn test_require_destination_id() {
        assert_eq!(require_destination_id(Some(" 42 ")).unwrap(), "42");
        assert!(matches!(
            require_destination_id(None),
            Err(PricingError::Validation(_))
        ));
        assert!(matches!(
            require_destination_id(Some("  ")),
            Err(PricingError::Validation(_))
        ));
    }

    #[test]
    fn test_optional_car_type_id_treats_blank_as_absent() {
        assert_eq!(optional_car_type_id(Some("")), None);
        assert_eq!(optional_car_type_id(None), None);
        assert_eq!(optional_car_type_id(Some("7")), Some("7"));
    }

    #[test]
    fn test_resolve_destination_missing_is_not_found() {
        assert!(matches!(
            resolve_destination(None),
            Err(PricingError::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_destination_copies_distance_and_toll() {
        let destination = Destination {
            id: "1".to_string(),
            name: "Ha Long".to_string(),
            distance_km: dec!(170),
            toll_fee_one_way: dec!(160000),
        };
        let leg = resolve_destination(Some(&destination)).unwrap();
        assert_eq!(leg.distance_one_way_km, dec!(170));
        assert_eq!(leg.toll_fee_one_way, dec!(160000));
    }

    #[test]
    fn test_resolve_car_profile_found() {
        let info = car_type();
        let lookup = resolve_car_profile(Some("limo"), Some(&info), &PricingConfig::default());
        assert_eq!(
            lookup,
            Lookup::Found(CarProfile {
                base_daily_rate: dec!(2500000),
                fuel_consumption_per_100km: dec!(14),
            })
        );
        assert!(!lookup.is_defaulted());
    }

    #[test]
    fn test_resolve_car_profile_unknown_id_falls_back() {
        let config = PricingConfig::default();
        let lookup = resolve_car_profile(Some("ghost"), None, &config);
        assert_eq!(lookup, Lookup::Defaulted(CarProfile::from_config(&config)));
    }

    #[test]
    fn test_resolve_car_profile_without_request_uses_defaults() {
        let config = PricingConfig::default();
        let lookup = resolve_car_profile(None, None, &config);
        assert!(lookup.is_defaulted());
        assert_eq!(lookup.value().unwrap().base_daily_rate, dec!(1300000));
        assert_eq!(lookup.value().unwrap().fuel_consumption_per_100km, dec!(12));
    }

    #[test]
    fn test_lookup_destination_miss_is_tagged_not_found() {
        let lookup = lookup_destination(None);
        assert_eq!(lookup, Lookup::NotFound);
        assert!(lookup.value().is_none());
        assert!(!lookup.is_defaulted());
    }
}
