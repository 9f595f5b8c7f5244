//! Client for the third-party place-information service.
//!
//! Covers the two outbound call shapes the backend needs: a detail lookup
//! returning a loosely-structured payload, and photo-asset resolution that
//! turns opaque photo resource names into stable CDN URLs. The normalizer
//! maps the external payload into the fixed shape the database persists.

mod client;
mod error;
pub mod normalize;
mod resolver;
pub mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use normalize::{build_place, NormalizedPlace};
