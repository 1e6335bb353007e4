//! Response DTOs for booking endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::pricing::responses::RentalPriceResponse;

use super::models::Booking;
use super::services::BookingReceipt;

/// A stored booking
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub booking_code: String,
    pub car_id: String,
    pub destination_id: String,
    pub car_type_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub rent_date_from: DateTime<Utc>,
    pub rent_date_to: DateTime<Utc>,
    pub rental_days: i64,
    pub rental_nights: i64,
    pub total_price: i64,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            booking_code: b.booking_code,
            car_id: b.car_id,
            destination_id: b.destination_id,
            car_type_id: b.car_type_id,
            customer_name: b.customer_name,
            customer_phone: b.customer_phone,
            customer_email: b.customer_email,
            rent_date_from: b.rent_date_from,
            rent_date_to: b.rent_date_to,
            rental_days: b.rental_days,
            rental_nights: b.rental_nights,
            total_price: b.total_price,
            notes: b.notes,
            status: b.status,
            created_at: b.created_at,
        }
    }
}

/// Response for a new booking: the row plus the quote it was priced with
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBookingResponse {
    #[serde(flatten)]
    pub booking: BookingResponse,
    pub quote: RentalPriceResponse,
}

impl From<BookingReceipt> for CreatedBookingResponse {
    fn from(receipt: BookingReceipt) -> Self {
        Self {
            booking: receipt.booking.into(),
            quote: receipt.pricing.into(),
        }
    }
}
