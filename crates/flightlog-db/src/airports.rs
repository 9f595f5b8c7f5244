//! Database operations for the static `airports` reference table.

use sqlx::PgPool;

use crate::DbError;

/// A row from the `airports` table, limited to the fields the API exposes.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AirportRow {
    pub name: Option<String>,
    pub latitude_deg: Option<f64>,
    pub longitude_deg: Option<f64>,
    pub municipality: Option<String>,
    pub iata_code: String,
}

/// Returns all airports that carry an IATA code, ordered by code.
///
/// Rows with an empty `iata_code` are heliports, closed fields, and other
/// entries the app never offers for flight logging.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_airports_with_iata(pool: &PgPool) -> Result<Vec<AirportRow>, DbError> {
    let rows = sqlx::query_as::<_, AirportRow>(
        "SELECT name, latitude_deg, longitude_deg, municipality, iata_code \
         FROM airports \
         WHERE iata_code <> '' \
         ORDER BY iata_code",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
