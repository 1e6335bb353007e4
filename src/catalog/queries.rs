//! Database queries for the car catalog.

use sqlx::PgPool;

use super::models::{CarDetail, CarFilterOptions, CarPage, CarSummary};
use super::requests::{CarFilter, CarSort};

const SUMMARY_COLUMNS: &str = r#"
    id::text AS id,
    COALESCE(name, '') AS name,
    COALESCE(slug, '') AS slug,
    COALESCE(price_per_day, 0)::numeric AS price_per_day,
    image_url,
    brand,
    type AS car_type,
    seats::int4 AS seats,
    transmission,
    COALESCE(is_featured, false) AS is_featured,
    created_at
"#;

/// Listing filter; `$1` search pattern, `$2` brand, `$3` type
const LISTING_FILTER: &str = r#"
    WHERE is_available = true
      AND ($1::text IS NULL OR name ILIKE $1 OR brand ILIKE $1 OR type ILIKE $1)
      AND ($2::text IS NULL OR brand = $2)
      AND ($3::text IS NULL OR type = $3)
"#;

/// `ILIKE` pattern matching `term` anywhere, with wildcards in it escaped
pub fn search_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn order_clause(sort: CarSort, ascending: bool) -> String {
    let direction = if ascending { "ASC" } else { "DESC" };
    match sort {
        CarSort::CreatedAt => format!("ORDER BY created_at {}, id", direction),
        other => format!(
            "ORDER BY {} {} NULLS LAST, created_at DESC, id",
            other.column(),
            direction
        ),
    }
}

/// Get one page of available cars matching the filter, plus the match count
pub async fn get_cars(pool: &PgPool, filter: &CarFilter) -> Result<CarPage, sqlx::Error> {
    let pattern = filter.search.as_deref().map(search_pattern);

    let sql = format!(
        "SELECT {} FROM cars {} {} LIMIT $4 OFFSET $5",
        SUMMARY_COLUMNS,
        LISTING_FILTER,
        order_clause(filter.sort, filter.ascending)
    );
    let cars = sqlx::query_as::<_, CarSummary>(&sql)
        .bind(pattern.as_deref())
        .bind(filter.brand.as_deref())
        .bind(filter.car_type.as_deref())
        .bind(filter.items_per_page)
        .bind(filter.offset())
        .fetch_all(pool)
        .await?;

    let count_sql = format!("SELECT COUNT(*) FROM cars {}", LISTING_FILTER);
    let total = sqlx::query_scalar::<_, i64>(&count_sql)
        .bind(pattern.as_deref())
        .bind(filter.brand.as_deref())
        .bind(filter.car_type.as_deref())
        .fetch_one(pool)
        .await?;

    Ok(CarPage { cars, total })
}

/// Get the newest featured cars
pub async fn get_featured_cars(pool: &PgPool, limit: i64) -> Result<Vec<CarSummary>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {}
        FROM cars
        WHERE is_featured = true AND is_available = true
        ORDER BY created_at DESC, id
        LIMIT $1
        "#,
        SUMMARY_COLUMNS
    );
    sqlx::query_as::<_, CarSummary>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await
}

/// Get the distinct brands and types of available cars
pub async fn get_filter_options(pool: &PgPool) -> Result<CarFilterOptions, sqlx::Error> {
    let brands = sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT brand
        FROM cars
        WHERE brand IS NOT NULL AND brand <> '' AND is_available = true
        ORDER BY brand
        "#,
    )
    .fetch_all(pool)
    .await?;

    let types = sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT type
        FROM cars
        WHERE type IS NOT NULL AND type <> '' AND is_available = true
        ORDER BY type
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(CarFilterOptions { brands, types })
}

/// Find an available car by slug
pub async fn find_car_by_slug(pool: &PgPool, slug: &str) -> Result<Option<CarDetail>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {},
            description,
            fuel_type,
            location,
            COALESCE(features, ARRAY[]::text[]) AS features
        FROM cars
        WHERE slug = $1 AND is_available = true
        "#,
        SUMMARY_COLUMNS
    );
    sqlx::query_as::<_, CarDetail>(&sql)
        .bind(slug)
        .fetch_optional(pool)
        .await
}

/// Find an available car by id
pub async fn find_available_car(
    pool: &PgPool,
    car_id: &str,
) -> Result<Option<CarSummary>, sqlx::Error> {
    let sql = format!(
        "SELECT {} FROM cars WHERE id::text = $1 AND is_available = true",
        SUMMARY_COLUMNS
    );
    sqlx::query_as::<_, CarSummary>(&sql)
        .bind(car_id)
        .fetch_optional(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        assert_eq!(search_pattern("camry"), "%camry%");
        assert_eq!(search_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(search_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_order_clause_breaks_ties() {
        assert_eq!(
            order_clause(CarSort::CreatedAt, false),
            "ORDER BY created_at DESC, id"
        );
        assert_eq!(
            order_clause(CarSort::PricePerDay, true),
            "ORDER BY price_per_day ASC NULLS LAST, created_at DESC, id"
        );
    }
}
