//! Rental price calculator for the car rental storefront.
//!
//! Serves `POST /calculate-rental-price` plus the destination and car type
//! lists the booking form offers, the car catalog and booking submission,
//! backed by Postgres.

pub mod booking;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod pricing;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::booking::BookingStore;
use crate::cache::PricingCache;
use crate::catalog::CatalogStore;
use crate::pricing::PricingStore;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PricingStore>,
    pub catalog: Arc<dyn CatalogStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub cache: PricingCache,
}

impl AppState {
    pub fn new(
        store: Arc<dyn PricingStore>,
        catalog: Arc<dyn CatalogStore>,
        bookings: Arc<dyn BookingStore>,
        cache: PricingCache,
    ) -> Self {
        Self {
            store,
            catalog,
            bookings,
            cache,
        }
    }
}

/// Build the application router with its middleware stack
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .merge(pricing::router())
        .merge(catalog::router())
        .merge(booking::router())
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
