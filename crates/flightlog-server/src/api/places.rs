use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use flightlog_db::PlaceRow;

use crate::middleware::RequestId;
use crate::pipeline::{self, PipelineError};

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// The canonical place record as the API exposes it.
#[derive(Debug, Serialize)]
pub(super) struct PlaceItem {
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
    pub types: Value,
    pub photos: Value,
    pub reviews: Option<Value>,
    pub opening_hours: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl From<PlaceRow> for PlaceItem {
    fn from(row: PlaceRow) -> Self {
        Self {
            external_id: row.external_id,
            display_name: row.display_name,
            formatted_address: row.formatted_address,
            website_uri: row.website_uri,
            phone_number: row.phone_number,
            primary_type: row.primary_type,
            rating: row.rating,
            user_rating_count: row.user_rating_count,
            latitude: row.latitude,
            longitude: row.longitude,
            price_level: row.price_level,
            types: row.types,
            photos: row.photos,
            reviews: row.reviews,
            opening_hours: row.opening_hours,
            created_at: row.created_at,
        }
    }
}

/// `GET /api/v1/places/{external_id}` — cached place details, enriched from
/// the place service on first access. Unauthenticated by design; the record
/// contains no caller-specific data.
pub(super) async fn get_place_details(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(external_id): Path<String>,
) -> Result<Json<ApiResponse<PlaceItem>>, ApiError> {
    let external_id = external_id.trim();
    if external_id.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "place id must not be blank",
        ));
    }

    let row = pipeline::get_or_fetch(&state.pool, &state.places, external_id, state.photo_budget)
        .await
        .map_err(|e| map_pipeline_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: PlaceItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn map_pipeline_error(request_id: String, error: &PipelineError) -> ApiError {
    match error {
        PipelineError::Places(e) if e.is_not_found() => {
            tracing::warn!(error = %e, "place unknown upstream");
            ApiError::new(request_id, "not_found", format!("place not found upstream: {e}"))
        }
        PipelineError::Places(e) => {
            tracing::error!(error = %e, "place service call failed");
            ApiError::new(request_id, "bad_gateway", format!("place service failure: {e}"))
        }
        PipelineError::Conflict => ApiError::new(
            request_id,
            "conflict",
            "place was cached by a concurrent request; retry the lookup",
        ),
        PipelineError::Db(e) => super::map_db_error(request_id, e),
    }
}
