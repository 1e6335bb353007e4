//! Car catalog module.
//!
//! Listing with search, filters, sorting and pagination, featured cars,
//! filter options and car details. Only available cars are ever shown.

pub mod error;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod store;

pub use error::CatalogError;
pub use routes::router;
pub use store::{CatalogStore, InMemoryCatalogStore, PgCatalogStore};
