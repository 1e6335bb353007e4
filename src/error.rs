//! Error handling for the application

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::booking::BookingError;
use crate::catalog::CatalogError;
use crate::pricing::responses::ErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::Validation(msg) => AppError::BadRequest(msg),
            PricingError::NotFound(msg) => AppError::NotFound(msg),
            PricingError::OutOfRange(msg) => AppError::Internal(msg),
            PricingError::Infrastructure(e) => AppError::Database(e),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::NotFound(msg) => AppError::NotFound(msg),
            CatalogError::Infrastructure(e) => AppError::Database(e),
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation(msg) => AppError::BadRequest(msg),
            BookingError::NotFound(msg) => AppError::NotFound(msg),
            BookingError::Pricing(e) => e.into(),
            e @ BookingError::CodeExhausted => AppError::Internal(e.to_string()),
            BookingError::Infrastructure(e) => AppError::Database(e),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                self.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                self.to_string()
            }
            AppError::BadRequest(_) | AppError::NotFound(_) => self.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_errors_map_to_status_codes() {
        let err = AppError::from(PricingError::validation("Invalid date range."));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::from(PricingError::not_found("Destination not found or invalid."));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = AppError::from(PricingError::Infrastructure(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::from(PricingError::out_of_range());
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal error: Pricing parameters out of range.");
    }

    #[test]
    fn test_catalog_and_booking_errors_map_to_status_codes() {
        let err = AppError::from(CatalogError::Validation("Unsupported sort column: x".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::from(CatalogError::NotFound("Car not found.".into()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = AppError::from(BookingError::validation("Customer name is required."));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::from(BookingError::Pricing(PricingError::not_found(
            "Destination not found or invalid.",
        )));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Destination not found or invalid.");

        let err = AppError::from(BookingError::CodeExhausted);
        assert!(matches!(err, AppError::Internal(_)));

        let err = AppError::from(BookingError::Infrastructure(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_message_is_passed_through() {
        let err = AppError::from(PricingError::validation("Destination ID is required."));
        assert_eq!(err.to_string(), "Destination ID is required.");
    }
}
