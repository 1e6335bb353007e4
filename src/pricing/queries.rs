//! Database queries for the pricing calculator.
//!
//! Ids are compared as text so the tables may use integer or uuid keys.
//! Numeric columns are cast to `numeric` to decode into `Decimal` whatever
//! their declared type. A missing distance or toll reads as zero; car types
//! without rates are skipped so they resolve to the default rates.

use sqlx::PgPool;

use super::models::{AppSetting, CarTypeInfo, Destination};

/// Get every row of the settings table
pub async fn get_app_settings(pool: &PgPool) -> Result<Vec<AppSetting>, sqlx::Error> {
    sqlx::query_as::<_, AppSetting>(
        r#"
        SELECT setting_key, COALESCE(setting_value, '') AS setting_value
        FROM app_settings
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Find a destination by id
pub async fn find_destination(
    pool: &PgPool,
    destination_id: &str,
) -> Result<Option<Destination>, sqlx::Error> {
    sqlx::query_as::<_, Destination>(
        r#"
        SELECT
            id::text AS id,
            COALESCE(name, '') AS name,
            COALESCE(distance_km, 0)::numeric AS distance_km,
            COALESCE(toll_fee_one_way, 0)::numeric AS toll_fee_one_way
        FROM destinations
        WHERE id::text = $1
        "#,
    )
    .bind(destination_id)
    .fetch_optional(pool)
    .await
}

/// Find a car type pricing profile by id
pub async fn find_car_type(
    pool: &PgPool,
    car_type_id: &str,
) -> Result<Option<CarTypeInfo>, sqlx::Error> {
    sqlx::query_as::<_, CarTypeInfo>(
        r#"
        SELECT
            id::text AS id,
            COALESCE(name, '') AS name,
            base_daily_rate::numeric AS base_daily_rate,
            fuel_consumption_l_per_100km::numeric AS fuel_consumption_l_per_100km
        FROM car_types
        WHERE id::text = $1
          AND base_daily_rate IS NOT NULL
          AND fuel_consumption_l_per_100km IS NOT NULL
        "#,
    )
    .bind(car_type_id)
    .fetch_optional(pool)
    .await
}

/// Get all destinations (for the booking form and cache warming)
pub async fn get_all_destinations(pool: &PgPool) -> Result<Vec<Destination>, sqlx::Error> {
    sqlx::query_as::<_, Destination>(
        r#"
        SELECT
            id::text AS id,
            COALESCE(name, '') AS name,
            COALESCE(distance_km, 0)::numeric AS distance_km,
            COALESCE(toll_fee_one_way, 0)::numeric AS toll_fee_one_way
        FROM destinations
        ORDER BY name, id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Get all car types (for the booking form and cache warming)
pub async fn get_all_car_types(pool: &PgPool) -> Result<Vec<CarTypeInfo>, sqlx::Error> {
    sqlx::query_as::<_, CarTypeInfo>(
        r#"
        SELECT
            id::text AS id,
            COALESCE(name, '') AS name,
            base_daily_rate::numeric AS base_daily_rate,
            fuel_consumption_l_per_100km::numeric AS fuel_consumption_l_per_100km
        FROM car_types
        WHERE base_daily_rate IS NOT NULL
          AND fuel_consumption_l_per_100km IS NOT NULL
        ORDER BY name, id
        "#,
    )
    .fetch_all(pool)
    .await
}
