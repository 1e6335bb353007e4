//! Booking service functions.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::cache::PricingCache;
use crate::catalog::CatalogStore;
use crate::pricing::calculators::parse_rental_date;
use crate::pricing::resolver::{optional_car_type_id, require_destination_id, Lookup};
use crate::pricing::{calculate_rental_price, PricingStore, RentalPriceResult};

use super::error::BookingError;
use super::models::{Booking, STATUS_PENDING};
use super::requests::CreateBookingRequest;
use super::store::{BookingStore, InsertOutcome};

/// Insert attempts before giving up on a free booking code
pub const MAX_CODE_ATTEMPTS: i64 = 3;

/// A stored booking and the quote that priced it
#[derive(Debug, Clone)]
pub struct BookingReceipt {
    pub booking: Booking,
    pub pricing: RentalPriceResult,
}

/// `BK-` plus the last six digits of the millisecond clock, nudged by `attempt`
pub fn booking_code(now: DateTime<Utc>, attempt: i64) -> String {
    let millis = now.timestamp_millis().saturating_add(attempt);
    format!("BK-{:06}", millis.rem_euclid(1_000_000))
}

/// Contact details after trimming
#[derive(Debug, Clone, PartialEq)]
struct Contact {
    name: String,
    phone: Option<String>,
    email: Option<String>,
}

fn validate_contact(request: &CreateBookingRequest) -> Result<Contact, BookingError> {
    let name = non_blank(request.customer_name.as_deref())
        .ok_or_else(|| BookingError::validation("Customer name is required."))?;
    let phone = non_blank(request.customer_phone.as_deref());
    let email = non_blank(request.customer_email.as_deref());

    if phone.is_none() && email.is_none() {
        return Err(BookingError::validation(
            "A phone number or email is required.",
        ));
    }
    if let Some(email) = email {
        if !looks_like_email(email) {
            return Err(BookingError::validation("Invalid email address."));
        }
    }

    Ok(Contact {
        name: name.to_string(),
        phone: phone.map(str::to_string),
        email: email.map(str::to_string),
    })
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Price and store a new pending booking.
///
/// Contact and car id are checked before any lookup; the quote then
/// validates dates and destination before it reads anything.
///
/// # Errors
/// * `Validation` - missing contact, car id, dates or destination
/// * `NotFound` - unknown destination, or the car is unknown or withdrawn
/// * `CodeExhausted` - every generated code collided
/// * `Infrastructure` - a store could not be read or written
pub async fn create_booking(
    pricing: &dyn PricingStore,
    catalog: &dyn CatalogStore,
    bookings: &dyn BookingStore,
    cache: &PricingCache,
    request: &CreateBookingRequest,
) -> Result<BookingReceipt, BookingError> {
    let contact = validate_contact(request)?;
    let car_id = non_blank(request.car_id.as_deref())
        .ok_or_else(|| BookingError::validation("Car ID is required."))?;

    let result = calculate_rental_price(pricing, cache, &request.price_request()).await?;

    if catalog.available_car(car_id).await?.is_none() {
        return Err(BookingError::NotFound(
            "Car not found or unavailable.".to_string(),
        ));
    }

    let (rent_date_from, rent_date_to) = match (
        parse_rental_date(&result.start_date),
        parse_rental_date(&result.end_date),
    ) {
        (Some(from), Some(to)) => (from, to),
        _ => return Err(BookingError::validation("Invalid date range.")),
    };

    let now = Utc::now();
    let mut booking = Booking {
        id: Uuid::new_v4(),
        booking_code: String::new(),
        car_id: car_id.to_string(),
        destination_id: require_destination_id(request.destination_id.as_deref())?.to_string(),
        car_type_id: match result.car {
            Lookup::Found(_) => optional_car_type_id(request.car_type_id.as_deref()),
            _ => None,
        }
        .map(str::to_string),
        customer_name: contact.name,
        customer_phone: contact.phone,
        customer_email: contact.email,
        rent_date_from,
        rent_date_to,
        rental_days: result.quote.duration.days,
        rental_nights: result.quote.duration.nights,
        total_price: result.quote.total_price,
        notes: non_blank(request.notes.as_deref()).map(str::to_string),
        status: STATUS_PENDING.to_string(),
        created_at: now,
    };

    for attempt in 0..MAX_CODE_ATTEMPTS {
        booking.booking_code = booking_code(now, attempt);
        match bookings.insert_booking(&booking).await? {
            InsertOutcome::Inserted => {
                tracing::info!(
                    booking_code = %booking.booking_code,
                    car_id = %booking.car_id,
                    total_price = booking.total_price,
                    "Booking created"
                );
                return Ok(BookingReceipt {
                    booking,
                    pricing: result,
                });
            }
            InsertOutcome::DuplicateCode => {
                tracing::warn!("Booking code {} already taken", booking.booking_code);
            }
        }
    }

    Err(BookingError::CodeExhausted)
}

/// Booking by code
pub async fn booking_by_code(
    bookings: &dyn BookingStore,
    booking_code: &str,
) -> Result<Booking, BookingError> {
    bookings
        .booking_by_code(booking_code.trim())
        .await?
        .ok_or_else(|| BookingError::NotFound("Booking not found.".to_string()))
}
