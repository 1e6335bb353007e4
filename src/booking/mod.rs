//! Booking submission.
//!
//! Prices the trip on the server, checks the car is still offered and stores
//! a pending booking under a short `BK-` code.

pub mod error;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod store;

pub use error::BookingError;
pub use routes::router;
pub use services::{create_booking, BookingReceipt};
pub use store::{BookingStore, InMemoryBookingStore, InsertOutcome, PgBookingStore};
