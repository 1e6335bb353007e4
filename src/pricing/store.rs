//! Read access to the tables the calculator prices from.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{AppSetting, CarTypeInfo, Destination};
use super::queries;

/// Read-only source of settings and reference data.
#[async_trait]
pub trait PricingStore: Send + Sync {
    async fn app_settings(&self) -> Result<Vec<AppSetting>, sqlx::Error>;
    async fn destination(&self, id: &str) -> Result<Option<Destination>, sqlx::Error>;
    async fn car_type(&self, id: &str) -> Result<Option<CarTypeInfo>, sqlx::Error>;
    async fn destinations(&self) -> Result<Vec<Destination>, sqlx::Error>;
    async fn car_types(&self) -> Result<Vec<CarTypeInfo>, sqlx::Error>;
}

/// Postgres-backed store
#[derive(Clone)]
pub struct PgPricingStore {
    pool: PgPool,
}

impl PgPricingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PricingStore for PgPricingStore {
    async fn app_settings(&self) -> Result<Vec<AppSetting>, sqlx::Error> {
        queries::get_app_settings(&self.pool).await
    }

    async fn destination(&self, id: &str) -> Result<Option<Destination>, sqlx::Error> {
        queries::find_destination(&self.pool, id).await
    }

    async fn car_type(&self, id: &str) -> Result<Option<CarTypeInfo>, sqlx::Error> {
        queries::find_car_type(&self.pool, id).await
    }

    async fn destinations(&self) -> Result<Vec<Destination>, sqlx::Error> {
        queries::get_all_destinations(&self.pool).await
    }

    async fn car_types(&self) -> Result<Vec<CarTypeInfo>, sqlx::Error> {
        queries::get_all_car_types(&self.pool).await
    }
}

/// Fixed in-memory store, used by tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPricingStore {
    settings: Vec<AppSetting>,
    destinations: HashMap<String, Destination>,
    car_types: HashMap<String, CarTypeInfo>,
    unavailable: bool,
}

impl InMemoryPricingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_setting(mut self, key: &str, value: &str) -> Self {
        self.settings.push(AppSetting::new(key, value));
        self
    }

    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destinations.insert(destination.id.clone(), destination);
        self
    }

    pub fn with_car_type(mut self, car_type: CarTypeInfo) -> Self {
        self.car_types.insert(car_type.id.clone(), car_type);
        self
    }

    /// Make every read fail as if the database were down.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.unavailable {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

#[async_trait]
impl PricingStore for InMemoryPricingStore {
    async fn app_settings(&self) -> Result<Vec<AppSetting>, sqlx::Error> {
        self.check()?;
        Ok(self.settings.clone())
    }

    async fn destination(&self, id: &str) -> Result<Option<Destination>, sqlx::Error> {
        self.check()?;
        Ok(self.destinations.get(id).cloned())
    }

    async fn car_type(&self, id: &str) -> Result<Option<CarTypeInfo>, sqlx::Error> {
        self.check()?;
        Ok(self.car_types.get(id).cloned())
    }

    async fn destinations(&self) -> Result<Vec<Destination>, sqlx::Error> {
        self.check()?;
        let mut all: Vec<Destination> = self.destinations.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn car_types(&self) -> Result<Vec<CarTypeInfo>, sqlx::Error> {
        self.check()?;
        let mut all: Vec<CarTypeInfo> = self.car_types.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }
}
