//! Cache-aside place enrichment.
//!
//! The public entry point is [`get_or_fetch`]: check the repository, and on a
//! miss drive detail fetch → photo resolution → normalization → insert. A
//! cached record is trusted forever; there is no TTL and no revalidation.
//!
//! Independent calls racing on the same external id are not deduplicated in
//! process — both issue upstream fetches, and the unique index on
//! `places.external_id` picks the winner at insert time. The loser surfaces
//! [`PipelineError::Conflict`] instead of re-reading the now-present row.

use std::time::Duration;

use sqlx::PgPool;
use thiserror::Error;

use flightlog_db::{get_place_by_external_id, insert_place, DbError, NewPlace, PlaceRow};
use flightlog_places::{build_place, NormalizedPlace, PlacesClient, PlacesError};

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Detail fetch failed; nothing was cached.
    #[error(transparent)]
    Places(#[from] PlacesError),

    /// A concurrent request inserted the same external id first.
    #[error("place was cached by a concurrent request")]
    Conflict,

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Returns the cached place for `external_id`, fetching and enriching it from
/// the place service on first access.
///
/// On a miss, every photo reference in the detail payload is resolved
/// concurrently, each bounded by `photo_budget`; unresolved photos are
/// dropped and never fail the call. Failure at any other step short-circuits
/// and caches nothing.
///
/// # Errors
///
/// - [`PipelineError::Places`] if the detail fetch fails (upstream status or
///   transport), propagated with the upstream diagnostics intact.
/// - [`PipelineError::Conflict`] if a concurrent call for the same id won the
///   insert race.
/// - [`PipelineError::Db`] for any other storage failure.
pub async fn get_or_fetch(
    pool: &PgPool,
    places: &PlacesClient,
    external_id: &str,
    photo_budget: Duration,
) -> Result<PlaceRow, PipelineError> {
    if let Some(row) = get_place_by_external_id(pool, external_id).await? {
        tracing::debug!(external_id, "place cache hit");
        return Ok(row);
    }

    let detail = places.fetch_detail(external_id).await?;

    let photo_refs: Vec<String> = detail.photos.iter().map(|p| p.name.clone()).collect();
    let photos = places.resolve_photos(&photo_refs, photo_budget).await;
    tracing::info!(
        external_id,
        requested = photo_refs.len(),
        resolved = photos.len(),
        "resolved place photos"
    );

    let normalized = build_place(external_id, detail, photos);

    match insert_place(pool, &to_new_place(normalized)).await {
        Ok(row) => Ok(row),
        Err(DbError::Conflict) => {
            tracing::warn!(external_id, "concurrent request cached this place first");
            Err(PipelineError::Conflict)
        }
        Err(e) => Err(e.into()),
    }
}

fn to_new_place(place: NormalizedPlace) -> NewPlace {
    NewPlace {
        external_id: place.external_id,
        display_name: place.display_name,
        formatted_address: place.formatted_address,
        website_uri: place.website_uri,
        phone_number: place.phone_number,
        primary_type: place.primary_type,
        rating: place.rating,
        user_rating_count: place.user_rating_count,
        latitude: place.latitude,
        longitude: place.longitude,
        price_level: place.price_level,
        types: place.types,
        photos: place.photos,
        reviews: place.reviews,
        opening_hours: place.opening_hours,
    }
}
