//! Booking error types.

use crate::catalog::CatalogError;
use crate::pricing::PricingError;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Every generated booking code was already taken.
    #[error("Could not allocate a booking code.")]
    CodeExhausted,

    #[error("Database error: {0}")]
    Infrastructure(#[from] sqlx::Error),
}

impl BookingError {
    pub fn validation(message: impl Into<String>) -> Self {
        BookingError::Validation(message.into())
    }
}

impl From<CatalogError> for BookingError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => BookingError::Validation(msg),
            CatalogError::NotFound(msg) => BookingError::NotFound(msg),
            CatalogError::Infrastructure(e) => BookingError::Infrastructure(e),
        }
    }
}
