//! Read access to the car catalog.

use std::cmp::Ordering;

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{CarDetail, CarFilterOptions, CarPage, CarSummary};
use super::queries;
use super::requests::{CarFilter, CarSort};

/// Read-only source of catalog cars. Unavailable cars are never returned.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn cars(&self, filter: &CarFilter) -> Result<CarPage, sqlx::Error>;
    async fn featured_cars(&self, limit: i64) -> Result<Vec<CarSummary>, sqlx::Error>;
    async fn filter_options(&self) -> Result<CarFilterOptions, sqlx::Error>;
    async fn car_by_slug(&self, slug: &str) -> Result<Option<CarDetail>, sqlx::Error>;
    async fn available_car(&self, car_id: &str) -> Result<Option<CarSummary>, sqlx::Error>;
}

/// Postgres-backed catalog
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn cars(&self, filter: &CarFilter) -> Result<CarPage, sqlx::Error> {
        queries::get_cars(&self.pool, filter).await
    }

    async fn featured_cars(&self, limit: i64) -> Result<Vec<CarSummary>, sqlx::Error> {
        queries::get_featured_cars(&self.pool, limit).await
    }

    async fn filter_options(&self) -> Result<CarFilterOptions, sqlx::Error> {
        queries::get_filter_options(&self.pool).await
    }

    async fn car_by_slug(&self, slug: &str) -> Result<Option<CarDetail>, sqlx::Error> {
        queries::find_car_by_slug(&self.pool, slug).await
    }

    async fn available_car(&self, car_id: &str) -> Result<Option<CarSummary>, sqlx::Error> {
        queries::find_available_car(&self.pool, car_id).await
    }
}

/// Fixed in-memory catalog, used by tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogStore {
    cars: Vec<(CarDetail, bool)>,
    unavailable: bool,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_car(mut self, car: CarDetail) -> Self {
        self.cars.push((car, true));
        self
    }

    /// Add a car that exists but is not available for rent.
    pub fn with_withdrawn_car(mut self, car: CarDetail) -> Self {
        self.cars.push((car, false));
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

    fn available(&self) -> impl Iterator<Item = &CarDetail> {
        self.cars
            .iter()
            .filter(|(_, available)| *available)
            .map(|(car, _)| car)
    }
}

fn matches(car: &CarSummary, filter: &CarFilter) -> bool {
    let contains = |field: Option<&str>, term: &str| {
        field.is_some_and(|f| f.to_lowercase().contains(&term.to_lowercase()))
    };
    let search_ok = filter.search.as_deref().map_or(true, |term| {
        contains(Some(car.name.as_str()), term)
            || contains(car.brand.as_deref(), term)
            || contains(car.car_type.as_deref(), term)
    });
    let brand_ok = filter
        .brand
        .as_deref()
        .map_or(true, |b| car.brand.as_deref() == Some(b));
    let type_ok = filter
        .car_type
        .as_deref()
        .map_or(true, |t| car.car_type.as_deref() == Some(t));
    search_ok && brand_ok && type_ok
}

/// Same order as the SQL listing: missing seat counts last either way.
fn compare(a: &CarSummary, b: &CarSummary, sort: CarSort, ascending: bool) -> Ordering {
    let directed = |o: Ordering| if ascending { o } else { o.reverse() };
    let primary = match sort {
        CarSort::CreatedAt => directed(a.created_at.cmp(&b.created_at)),
        CarSort::PricePerDay => directed(a.price_per_day.cmp(&b.price_per_day)),
        CarSort::Name => directed(a.name.cmp(&b.name)),
        CarSort::Seats => match (a.seats, b.seats) {
            (Some(x), Some(y)) => directed(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    };
    primary
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn cars(&self, filter: &CarFilter) -> Result<CarPage, sqlx::Error> {
        self.check()?;
        let mut matching: Vec<CarSummary> = self
            .available()
            .map(|car| car.summary.clone())
            .filter(|car| matches(car, filter))
            .collect();
        matching.sort_by(|a, b| compare(a, b, filter.sort, filter.ascending));

        let total = matching.len() as i64;
        let cars = matching
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.items_per_page as usize)
            .collect();
        Ok(CarPage { cars, total })
    }

    async fn featured_cars(&self, limit: i64) -> Result<Vec<CarSummary>, sqlx::Error> {
        self.check()?;
        let mut featured: Vec<CarSummary> = self
            .available()
            .filter(|car| car.summary.is_featured)
            .map(|car| car.summary.clone())
            .collect();
        featured.sort_by(|a, b| compare(a, b, CarSort::CreatedAt, false));
        featured.truncate(limit as usize);
        Ok(featured)
    }

    async fn filter_options(&self) -> Result<CarFilterOptions, sqlx::Error> {
        self.check()?;
        let distinct = |field: fn(&CarSummary) -> Option<&String>| {
            let mut values: Vec<String> = self
                .available()
                .filter_map(|car| field(&car.summary))
                .filter(|v| !v.is_empty())
                .cloned()
                .collect();
            values.sort();
            values.dedup();
            values
        };
        Ok(CarFilterOptions {
            brands: distinct(|car| car.brand.as_ref()),
            types: distinct(|car| car.car_type.as_ref()),
        })
    }

    async fn car_by_slug(&self, slug: &str) -> Result<Option<CarDetail>, sqlx::Error> {
        self.check()?;
        Ok(self.available().find(|car| car.summary.slug == slug).cloned())
    }

    async fn available_car(&self, car_id: &str) -> Result<Option<CarSummary>, sqlx::Error> {
        self.check()?;
        Ok(self
            .available()
            .find(|car| car.summary.id == car_id)
            .map(|car| car.summary.clone()))
    }
}
