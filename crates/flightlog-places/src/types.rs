//! Deserialization types for the place-service detail payload.
//!
//! Every field is optional at the wire level; absence must stay
//! distinguishable from zero or empty once normalized, so nothing here
//! supplies placeholder defaults beyond empty collections.

use serde::Deserialize;
use serde_json::Value;

/// The raw detail payload for a single place.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetail {
    #[serde(default)]
    pub display_name: Option<DisplayName>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_rating_count: Option<i64>,
    #[serde(default)]
    pub location: Option<LatLng>,
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
    #[serde(default)]
    pub primary_type: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    /// Opaque opening-hours blob, persisted verbatim.
    #[serde(default)]
    pub regular_opening_hours: Option<Value>,
    #[serde(default)]
    pub price_level: Option<String>,
    #[serde(default)]
    pub website_uri: Option<String>,
    #[serde(default)]
    pub national_phone_number: Option<String>,
    /// Opaque reviews blob, persisted verbatim.
    #[serde(default)]
    pub reviews: Option<Value>,
}

/// Display name, either the localized `{ text, languageCode }` object or a
/// bare string (older payloads).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DisplayName {
    Localized {
        #[serde(default)]
        text: Option<String>,
    },
    Plain(String),
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// An opaque photo resource name (e.g. `places/{id}/photos/{ref}`).
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoRef {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_parses_with_all_fields_absent() {
        let detail: PlaceDetail = serde_json::from_str("{}").expect("empty object should parse");

        assert!(detail.display_name.is_none());
        assert!(detail.rating.is_none());
        assert!(detail.photos.is_empty());
        assert!(detail.types.is_empty());
    }

    #[test]
    fn display_name_parses_localized_object() {
        let detail: PlaceDetail =
            serde_json::from_value(serde_json::json!({ "displayName": { "text": "Cafe Orly" } }))
                .expect("should parse");

        match detail.display_name {
            Some(DisplayName::Localized { text }) => assert_eq!(text.as_deref(), Some("Cafe Orly")),
            other => panic!("expected localized display name, got {other:?}"),
        }
    }

    #[test]
    fn display_name_parses_bare_string() {
        let detail: PlaceDetail =
            serde_json::from_value(serde_json::json!({ "displayName": "Cafe Orly" }))
                .expect("should parse");

        match detail.display_name {
            Some(DisplayName::Plain(s)) => assert_eq!(s, "Cafe Orly"),
            other => panic!("expected plain display name, got {other:?}"),
        }
    }
}
