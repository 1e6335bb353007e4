//! Query parameters for catalog endpoints.

use serde::Deserialize;

use super::error::CatalogError;

pub const DEFAULT_ITEMS_PER_PAGE: i64 = 8;
pub const MAX_ITEMS_PER_PAGE: i64 = 50;
pub const DEFAULT_FEATURED_LIMIT: i64 = 4;
pub const MAX_FEATURED_LIMIT: i64 = 20;

/// Query string of `GET /cars`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarListQuery {
    pub page: Option<i64>,
    pub items_per_page: Option<i64>,
    pub search: Option<String>,
    pub brand: Option<String>,
    #[serde(rename = "type")]
    pub car_type: Option<String>,
    pub sort_by: Option<String>,
    pub ascending: Option<bool>,
}

/// Query string of `GET /cars/featured`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<i64>,
}

impl FeaturedQuery {
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_FEATURED_LIMIT)
            .clamp(1, MAX_FEATURED_LIMIT)
    }
}

/// Column a listing is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CarSort {
    #[default]
    CreatedAt,
    PricePerDay,
    Name,
    Seats,
}

impl CarSort {
    /// Accepts both the column name and its camelCase form.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "created_at" | "createdAt" => Some(Self::CreatedAt),
            "price_per_day" | "pricePerDay" => Some(Self::PricePerDay),
            "name" => Some(Self::Name),
            "seats" => Some(Self::Seats),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::PricePerDay => "price_per_day",
            Self::Name => "name",
            Self::Seats => "seats",
        }
    }
}

/// Validated listing criteria
#[derive(Debug, Clone, PartialEq)]
pub struct CarFilter {
    pub search: Option<String>,
    pub brand: Option<String>,
    pub car_type: Option<String>,
    pub sort: CarSort,
    pub ascending: bool,
    pub page: i64,
    pub items_per_page: i64,
}

impl CarFilter {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.items_per_page
    }
}

impl Default for CarFilter {
    fn default() -> Self {
        Self {
            search: None,
            brand: None,
            car_type: None,
            sort: CarSort::CreatedAt,
            ascending: false,
            page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl TryFrom<&CarListQuery> for CarFilter {
    type Error = CatalogError;

    fn try_from(query: &CarListQuery) -> Result<Self, Self::Error> {
        let sort = match non_blank(query.sort_by.as_deref()) {
            None => CarSort::default(),
            Some(raw) => CarSort::parse(raw).ok_or_else(|| {
                CatalogError::Validation(format!("Unsupported sort column: {}", raw))
            })?,
        };

        Ok(Self {
            search: non_blank(query.search.as_deref()).map(str::to_string),
            brand: non_blank(query.brand.as_deref()).map(str::to_string),
            car_type: non_blank(query.car_type.as_deref()).map(str::to_string),
            sort,
            ascending: query.ascending.unwrap_or(false),
            page: query.page.unwrap_or(1).max(1),
            items_per_page: query
                .items_per_page
                .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
                .clamp(1, MAX_ITEMS_PER_PAGE),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
