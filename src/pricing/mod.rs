//! Rental pricing module.
//!
//! Prices a rental trip from the admin-editable settings, the destination's
//! distance and toll, and the car type's daily rate and fuel consumption.

pub mod calculators;
pub mod error;
pub mod models;
pub mod queries;
pub mod requests;
pub mod resolver;
pub mod responses;
pub mod routes;
pub mod services;
pub mod settings;
pub mod store;

// Re-export commonly used items
pub use calculators::{round_money, PriceQuote, RentalDuration};
pub use error::PricingError;
pub use routes::router;
pub use services::{calculate_rental_price, RentalPriceResult};
pub use settings::PricingConfig;
pub use store::{InMemoryPricingStore, PgPricingStore, PricingStore};
