use thiserror::Error;

/// Errors returned by the place-service client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The place service returned a non-2xx status; the body is kept
    /// verbatim for diagnostics.
    #[error("place service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// A request URL could not be constructed.
    #[error("invalid URL: {0}")]
    Url(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PlacesError {
    /// True when the upstream rejected the place id itself (HTTP 404).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, PlacesError::Upstream { status: 404, .. })
    }
}
