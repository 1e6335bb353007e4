//! Write access to the bookings table.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::Booking;
use super::queries;

/// What happened to an insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// Another booking already holds the code.
    DuplicateCode,
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn insert_booking(&self, booking: &Booking) -> Result<InsertOutcome, sqlx::Error>;
    async fn booking_by_code(&self, booking_code: &str) -> Result<Option<Booking>, sqlx::Error>;
}

/// Postgres-backed bookings
#[derive(Clone)]
pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn insert_booking(&self, booking: &Booking) -> Result<InsertOutcome, sqlx::Error> {
        match queries::insert_booking(&self.pool, booking).await {
            Ok(()) => Ok(InsertOutcome::Inserted),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Ok(InsertOutcome::DuplicateCode)
            }
            Err(e) => Err(e),
        }
    }

    async fn booking_by_code(&self, booking_code: &str) -> Result<Option<Booking>, sqlx::Error> {
        queries::find_booking_by_code(&self.pool, booking_code).await
    }
}

/// In-memory bookings, used by tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingStore {
    bookings: Arc<RwLock<Vec<Booking>>>,
    collisions: Arc<RwLock<usize>>,
    unavailable: bool,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the next `count` inserts as code collisions.
    pub fn with_code_collisions(self, count: usize) -> Self {
        if let Ok(mut collisions) = self.collisions.write() {
            *collisions = count;
        }
        self
    }

    /// Make every call fail as if the database were down.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Snapshot of the stored bookings
    pub fn bookings(&self) -> Vec<Booking> {
        self.bookings
            .read()
            .map(|bookings| bookings.clone())
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.unavailable {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

fn poisoned<T>(_: T) -> sqlx::Error {
    sqlx::Error::Protocol("booking store lock poisoned".to_string())
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn insert_booking(&self, booking: &Booking) -> Result<InsertOutcome, sqlx::Error> {
        self.check()?;
        {
            let mut collisions = self.collisions.write().map_err(poisoned)?;
            if *collisions > 0 {
                *collisions -= 1;
                return Ok(InsertOutcome::DuplicateCode);
            }
        }

        let mut bookings = self.bookings.write().map_err(poisoned)?;
        if bookings
            .iter()
            .any(|b| b.booking_code == booking.booking_code)
        {
            return Ok(InsertOutcome::DuplicateCode);
        }
        bookings.push(booking.clone());
        Ok(InsertOutcome::Inserted)
    }

    async fn booking_by_code(&self, booking_code: &str) -> Result<Option<Booking>, sqlx::Error> {
        self.check()?;
        let bookings = self.bookings.read().map_err(poisoned)?;
        Ok(bookings
            .iter()
            .find(|b| b.booking_code == booking_code)
            .cloned())
    }
}
