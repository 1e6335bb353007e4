//! Pricing calculation error types.

/// Why a quote could not be produced.
///
/// A car type that does not resolve is deliberately absent: that path falls
/// back to the configured defaults instead of failing.
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Settings or reference rows push an amount past what can be represented.
    #[error("{0}")]
    OutOfRange(String),

    #[error("Database error: {0}")]
    Infrastructure(#[from] sqlx::Error),
}

impl PricingError {
    pub fn validation(message: impl Into<String>) -> Self {
        PricingError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        PricingError::NotFound(message.into())
    }

    pub fn out_of_range() -> Self {
        PricingError::OutOfRange("Pricing parameters out of range.".to_string())
    }
}
