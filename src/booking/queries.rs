//! Database queries for bookings.

use sqlx::PgPool;

use super::models::Booking;

/// Insert a booking row
pub async fn insert_booking(pool: &PgPool, booking: &Booking) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO bookings (
            id, booking_code, car_id, destination_id, car_type_id,
            customer_name, customer_phone, customer_email,
            rent_date_from, rent_date_to, rental_days, rental_nights,
            total_price, notes, status, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        "#,
    )
    .bind(booking.id)
    .bind(&booking.booking_code)
    .bind(&booking.car_id)
    .bind(&booking.destination_id)
    .bind(booking.car_type_id.as_deref())
    .bind(&booking.customer_name)
    .bind(booking.customer_phone.as_deref())
    .bind(booking.customer_email.as_deref())
    .bind(booking.rent_date_from)
    .bind(booking.rent_date_to)
    .bind(booking.rental_days)
    .bind(booking.rental_nights)
    .bind(booking.total_price)
    .bind(booking.notes.as_deref())
    .bind(&booking.status)
    .bind(booking.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Find a booking by its code
pub async fn find_booking_by_code(
    pool: &PgPool,
    booking_code: &str,
) -> Result<Option<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        r#"
        SELECT id, booking_code, car_id, destination_id, car_type_id,
               customer_name, customer_phone, customer_email,
               rent_date_from, rent_date_to, rental_days, rental_nights,
               total_price, notes, status, created_at
        FROM bookings
        WHERE booking_code = $1
        "#,
    )
    .bind(booking_code)
    .fetch_optional(pool)
    .await
}
