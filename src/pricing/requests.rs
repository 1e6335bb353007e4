//! Request DTOs for pricing API endpoints.

use serde::{Deserialize, Deserializer};

/// Request to calculate a rental price
///
/// Every field is optional at the wire level so that a missing field turns
/// into a validation error with a readable message rather than a rejected body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRentalPriceRequest {
    #[serde(default, deserialize_with = "string_or_number")]
    pub destination_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub car_type_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Ids may arrive as JSON strings or numbers depending on the table's key type.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
