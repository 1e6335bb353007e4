//! Pricing service functions with database access.
//!
//! These functions read settings and reference rows through the cache and the
//! store, then hand them to the pure calculators.

use std::sync::Arc;

use crate::cache::PricingCache;

use super::calculators::{compose_quote, rental_duration, PriceQuote};
use super::error::PricingError;
use super::models::{AppSetting, CarTypeInfo, Destination};
use super::requests::CalculateRentalPriceRequest;
use super::resolver::{
    optional_car_type_id, require_destination_id, resolve_car_profile, resolve_destination,
    CarProfile, Lookup, TripLeg,
};
use super::settings::PricingConfig;
use super::store::PricingStore;

/// Result of a rental price calculation, with every input it consumed
#[derive(Debug, Clone)]
pub struct RentalPriceResult {
    pub quote: PriceQuote,
    pub config: PricingConfig,
    pub leg: TripLeg,
    pub car: Lookup<CarProfile>,
    pub start_date: String,
    pub end_date: String,
}

/// Calculate the price of a rental trip.
///
/// All request validation happens before any lookup. Settings, destination
/// and car type are then read concurrently.
///
/// # Errors
/// * `Validation` - missing dates or destination id, bad or inverted dates
/// * `NotFound` - the destination does not exist
/// * `OutOfRange` - settings or rows overflow the price arithmetic
/// * `Infrastructure` - settings or destination could not be read
pub async fn calculate_rental_price(
    store: &dyn PricingStore,
    cache: &PricingCache,
    request: &CalculateRentalPriceRequest,
) -> Result<RentalPriceResult, PricingError> {
    let (start_date, end_date) = match (
        non_blank(request.start_date.as_deref()),
        non_blank(request.end_date.as_deref()),
    ) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(PricingError::validation(
                "Start date and end date are required.",
            ))
        }
    };
    let destination_id = require_destination_id(request.destination_id.as_deref())?;
    let car_type_id = optional_car_type_id(request.car_type_id.as_deref());
    let duration = rental_duration(start_date, end_date)?;

    let (settings, destination, car_type) = tokio::join!(
        load_settings(store, cache),
        load_destination(store, cache, destination_id),
        load_car_type(store, cache, car_type_id),
    );

    let config = PricingConfig::from_settings(&settings?);
    let leg = resolve_destination(destination?.as_deref())?;
    let car = resolve_car_profile(car_type_id, car_type.as_deref(), &config);

    let profile = car
        .value()
        .cloned()
        .unwrap_or_else(|| CarProfile::from_config(&config));
    let quote = compose_quote(&config, &leg, &profile, duration)?;

    tracing::debug!(
        destination_id,
        car_type_id,
        days = quote.duration.days,
        total_price = quote.total_price,
        "Rental price calculated"
    );

    Ok(RentalPriceResult {
        quote,
        config,
        leg,
        car,
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Settings snapshot, from cache when fresh
async fn load_settings(
    store: &dyn PricingStore,
    cache: &PricingCache,
) -> Result<Arc<Vec<AppSetting>>, PricingError> {
    if let Some(cached) = cache.get_settings().await {
        tracing::debug!("Cache HIT for settings");
        return Ok(cached);
    }
    tracing::debug!("Cache MISS for settings");
    let settings = store.app_settings().await?;
    Ok(cache.put_settings(settings).await)
}

async fn load_destination(
    store: &dyn PricingStore,
    cache: &PricingCache,
    destination_id: &str,
) -> Result<Option<Arc<Destination>>, PricingError> {
    if let Some(cached) = cache.destinations.get(destination_id).await {
        return Ok(Some(cached));
    }
    let destination = match store.destination(destination_id).await? {
        Some(d) => Arc::new(d),
        None => return Ok(None),
    };
    cache
        .destinations
        .insert(destination_id.to_string(), destination.clone())
        .await;
    Ok(Some(destination))
}

/// Car type row, if requested and readable.
///
/// A failed read degrades to `None` like an unknown id.
async fn load_car_type(
    store: &dyn PricingStore,
    cache: &PricingCache,
    car_type_id: Option<&str>,
) -> Option<Arc<CarTypeInfo>> {
    let car_type_id = car_type_id?;
    if let Some(cached) = cache.car_types.get(car_type_id).await {
        return Some(cached);
    }
    let car_type = match store.car_type(car_type_id).await {
        Ok(Some(c)) => Arc::new(c),
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Failed to load car type {}: {}", car_type_id, e);
            return None;
        }
    };
    cache
        .car_types
        .insert(car_type_id.to_string(), car_type.clone())
        .await;
    Some(car_type)
}

/// All destinations, ordered by name
pub async fn list_destinations(
    store: &dyn PricingStore,
) -> Result<Vec<Destination>, PricingError> {
    Ok(store.destinations().await?)
}

/// All car types, ordered by name
pub async fn list_car_types(
    store: &dyn PricingStore,
) -> Result<Vec<CarTypeInfo>, PricingError> {
    Ok(store.car_types().await?)
}
