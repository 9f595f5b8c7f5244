//! Database operations for the `places` table.
//!
//! The table is write-once per external id: there is a read, an insert, and
//! nothing else. The unique index on `external_id` is the only concurrency
//! control between requests racing on the same id.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `places` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PlaceRow {
    pub id: i64,
    pub external_id: String,
    pub display_name: Option<String>,
    pub formatted_address: Option<String>,
    pub website_uri: Option<String>,
    pub phone_number: Option<String>,
    pub primary_type: Option<String>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price_level: Option<String>,
    /// JSON array of category tags.
    pub types: Value,
    /// JSON array of resolved photo URLs, in payload order.
    pub photos: Value,
    pub reviews: Option<Value>,
    pub opening_hours: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// Insert parameters for a new place record.
#[derive(Debug, Clone)]
pub struct NewPlace {
    pub external_id: String,
    pub display_name: Option<String>,
    pub formatted_address: Option<String>,
    pub website_uri: Option<String>,
    pub phone_number: Option<String>,
    pub primary_type: Option<String>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price_level: Option<String>,
    pub types: Vec<String>,
    pub photos: Vec<String>,
    pub reviews: Option<Value>,
    pub opening_hours: Option<Value>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

const PLACE_COLUMNS: &str = "id, external_id, display_name, formatted_address, website_uri, \
     phone_number, primary_type, rating, user_rating_count, latitude, longitude, \
     price_level, types, photos, reviews, opening_hours, created_at";

/// Returns the cached place for an external id, or `None` if not cached yet.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_place_by_external_id(
    pool: &PgPool,
    external_id: &str,
) -> Result<Option<PlaceRow>, DbError> {
    let row = sqlx::query_as::<_, PlaceRow>(&format!(
        "SELECT {PLACE_COLUMNS} FROM places WHERE external_id = $1"
    ))
    .bind(external_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Inserts a new place record and returns the stored row.
///
/// # Errors
///
/// Returns [`DbError::Conflict`] if a row with the same `external_id` already
/// exists, or [`DbError::Sqlx`] for any other failure.
pub async fn insert_place(pool: &PgPool, new: &NewPlace) -> Result<PlaceRow, DbError> {
    let types = Value::from(new.types.clone());
    let photos = Value::from(new.photos.clone());

    let result = sqlx::query_as::<_, PlaceRow>(&format!(
        "INSERT INTO places \
             (external_id, display_name, formatted_address, website_uri, phone_number, \
              primary_type, rating, user_rating_count, latitude, longitude, price_level, \
              types, photos, reviews, opening_hours) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
         RETURNING {PLACE_COLUMNS}"
    ))
    .bind(&new.external_id)
    .bind(&new.display_name)
    .bind(&new.formatted_address)
    .bind(&new.website_uri)
    .bind(&new.phone_number)
    .bind(&new.primary_type)
    .bind(new.rating)
    .bind(new.user_rating_count)
    .bind(new.latitude)
    .bind(new.longitude)
    .bind(&new.price_level)
    .bind(types)
    .bind(photos)
    .bind(&new.reviews)
    .bind(&new.opening_hours)
    .fetch_one(pool)
    .await;

    match result {
        Ok(row) => Ok(row),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(DbError::Conflict),
        Err(e) => Err(DbError::Sqlx(e)),
    }
}
