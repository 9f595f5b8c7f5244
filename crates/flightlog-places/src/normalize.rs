//! Normalization of the external detail payload into the canonical place
//! record persisted by the database.

use serde_json::Value;

use crate::types::{DisplayName, PlaceDetail};

/// A normalized place ready for database persistence.
///
/// Optional fields stay `None` when the payload omitted them — a rating of
/// exactly `0.0` or a count of `0` is present data, not absence.
#[derive(Debug, Clone)]
pub struct NormalizedPlace {
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
    /// Resolved photo URLs, in payload order, successes only.
    pub photos: Vec<String>,
    pub reviews: Option<Value>,
    pub opening_hours: Option<Value>,
}

/// Maps a detail payload and its resolved photo URLs into a [`NormalizedPlace`].
///
/// Pure and synchronous. The display name prefers the localized text field
/// and falls back to the bare string form; coordinates come from the nested
/// location object; `reviews` and opening hours attach verbatim.
#[must_use]
pub fn build_place(
    external_id: &str,
    detail: PlaceDetail,
    photos: Vec<String>,
) -> NormalizedPlace {
    let display_name = detail.display_name.and_then(|name| match name {
        DisplayName::Localized { text } => text,
        DisplayName::Plain(s) => Some(s),
    });

    let (latitude, longitude) = match detail.location {
        Some(loc) => (Some(loc.latitude), Some(loc.longitude)),
        None => (None, None),
    };

    let user_rating_count = detail
        .user_rating_count
        .filter(|count| *count >= 0)
        .and_then(|count| i32::try_from(count).ok());

    NormalizedPlace {
        external_id: external_id.to_owned(),
        display_name,
        formatted_address: detail.formatted_address,
        website_uri: detail.website_uri,
        phone_number: detail.national_phone_number,
        primary_type: detail.primary_type,
        rating: detail.rating,
        user_rating_count,
        latitude,
        longitude,
        price_level: detail.price_level,
        types: detail.types,
        photos,
        reviews: detail.reviews,
        opening_hours: detail.regular_opening_hours,
    }
}
