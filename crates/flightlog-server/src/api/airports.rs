use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct AirportItem {
    pub name: Option<String>,
    pub latitude_deg: Option<f64>,
    pub longitude_deg: Option<f64>,
    pub municipality: Option<String>,
    pub iata_code: String,
}

/// `GET /api/v1/airports` — the static airport list the app offers when
/// logging a flight; only rows with an IATA code are returned.
pub(super) async fn list_airports(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<AirportItem>>>, ApiError> {
    let rows = flightlog_db::list_airports_with_iata(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| AirportItem {
            name: row.name,
            latitude_deg: row.latitude_deg,
            longitude_deg: row.longitude_deg,
            municipality: row.municipality,
            iata_code: row.iata_code,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
