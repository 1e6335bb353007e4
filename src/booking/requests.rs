//! Request DTOs for booking endpoints.

use serde::Deserialize;

use crate::pricing::requests::{string_or_number, CalculateRentalPriceRequest};

/// Booking form submission
///
/// The price is never taken from the client; it is recomputed from the
/// destination, car type and dates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default, deserialize_with = "string_or_number")]
    pub car_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub destination_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub car_type_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateBookingRequest {
    /// The pricing half of the submission
    pub fn price_request(&self) -> CalculateRentalPriceRequest {
        CalculateRentalPriceRequest {
            destination_id: self.destination_id.clone(),
            car_type_id: self.car_type_id.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_booking_form() {
        let request: CreateBookingRequest = serde_json::from_str(
            r#"{
                "carId": 3,
                "destinationId": "7",
                "startDate": "2024-05-01",
                "endDate": "2024-05-03",
                "customerName": "Lan",
                "customerEmail": "lan@example.com",
                "totalPrice": 1
            }"#,
        )
        .unwrap();
        assert_eq!(request.car_id.as_deref(), Some("3"));
        assert_eq!(request.customer_phone, None);

        let price = request.price_request();
        assert_eq!(price.destination_id.as_deref(), Some("7"));
        assert_eq!(price.car_type_id, None);
        assert_eq!(price.end_date.as_deref(), Some("2024-05-03"));
    }
}
