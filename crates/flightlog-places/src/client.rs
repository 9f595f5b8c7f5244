//! HTTP client for the place-information service.
//!
//! Wraps `reqwest` with service-specific error handling, API key management,
//! and typed response deserialization. Detail lookups use a fixed field mask;
//! photo-asset requests disable redirect following so the redirect target can
//! be captured as the resolved URL instead of being fetched.

use std::time::Duration;

use reqwest::{redirect, Client, Url};

use crate::error::PlacesError;
use crate::types::PlaceDetail;

const DEFAULT_BASE_URL: &str = "https://places.googleapis.com/v1/";

/// Field mask sent with every detail lookup; the service only returns what is
/// asked for, and the normalizer maps exactly this set.
const DETAIL_FIELD_MASK: &str = "displayName,formattedAddress,rating,userRatingCount,location,\
photos,primaryType,types,regularOpeningHours,priceLevel,websiteUri,nationalPhoneNumber,reviews";

const PHOTO_MAX_HEIGHT_PX: &str = "800";

/// Client for the place-information service.
///
/// Manages the HTTP clients, API key, and base URL. Use [`PlacesClient::new`]
/// for production or [`PlacesClient::with_base_url`] to point at a mock
/// server in tests.
#[derive(Clone)]
pub struct PlacesClient {
    client: Client,
    // Separate client because photo-asset requests must not follow redirects.
    photo_client: Client,
    api_key: String,
    base_url: Url,
}

impl PlacesClient {
    /// Creates a new client pointed at the production place service.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::Url`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("flightlog/0.1 (place-enrichment)")
            .build()?;

        let photo_client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("flightlog/0.1 (place-enrichment)")
            .redirect(redirect::Policy::none())
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends path segments rather than replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| PlacesError::Url(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            photo_client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches the detail payload for an external place id.
    ///
    /// Sends the API key and the fixed field mask as headers. The call is
    /// attempted exactly once; there is no retry.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Upstream`] on any non-2xx status, carrying the status
    ///   and response body verbatim.
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected
    ///   shape.
    pub async fn fetch_detail(&self, external_id: &str) -> Result<PlaceDetail, PlacesError> {
        let url = self
            .base_url
            .join(&format!("places/{external_id}"))
            .map_err(|e| PlacesError::Url(format!("place id '{external_id}': {e}")))?;

        let response = self
            .client
            .get(url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", DETAIL_FIELD_MASK)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: format!("fetch_detail({external_id})"),
            source: e,
        })
    }

    /// Resolves a single photo resource name to a stable asset URL.
    ///
    /// Issues a GET against the constructed media URL with redirect following
    /// disabled. A 3xx response's `Location` header is the resolved URL; a
    /// direct 2xx means the service serves the asset at the request URL
    /// itself. Anything else, including transport failure, yields `None` —
    /// an unresolved photo is dropped, never escalated.
    pub async fn fetch_photo_asset(&self, photo_ref: &str) -> Option<String> {
        let url = match self.build_photo_url(photo_ref) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(photo_ref = %photo_ref, error = %e, "skipping unresolvable photo reference");
                return None;
            }
        };

        let response = match self.photo_client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(photo_ref = %photo_ref, error = %e, "photo asset request failed");
                return None;
            }
        };

        let status = response.status();
        if status.is_redirection() {
            let location = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(ToOwned::to_owned);
            if location.is_none() {
                tracing::warn!(photo_ref = %photo_ref, status = status.as_u16(), "redirect without Location header");
            }
            return location;
        }

        if status.is_success() {
            return Some(url.to_string());
        }

        tracing::warn!(photo_ref = %photo_ref, status = status.as_u16(), "photo asset request rejected");
        None
    }

    /// Builds the media URL for a photo resource name, with the height cap
    /// and API key as query parameters.
    fn build_photo_url(&self, photo_ref: &str) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(&format!("{}/media", photo_ref.trim_matches('/')))
            .map_err(|e| PlacesError::Url(format!("photo ref '{photo_ref}': {e}")))?;
        url.query_pairs_mut()
            .append_pair("maxHeightPx", PHOTO_MAX_HEIGHT_PX)
            .append_pair("key", &self.api_key);
        Ok(url)
    }
}
