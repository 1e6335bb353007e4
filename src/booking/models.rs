//! Booking database models.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const STATUS_PENDING: &str = "pending";

/// Stored booking
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Booking {
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
