//! Concurrent photo-reference resolution for `PlacesClient`.

use std::time::Duration;

use futures::future::join_all;

use crate::client::PlacesClient;

impl PlacesClient {
    /// Resolves every photo reference to a stable URL, concurrently.
    ///
    /// One fetch per reference, all issued at once and fully joined before
    /// returning. Each fetch is individually bounded by `per_photo_budget`;
    /// a timed-out or failed fetch contributes nothing and never fails its
    /// siblings or the aggregate. The output preserves the input order of
    /// the references that succeeded, so it may be shorter than the input.
    ///
    /// An empty input returns immediately without issuing any request.
    pub async fn resolve_photos(
        &self,
        photo_refs: &[String],
        per_photo_budget: Duration,
    ) -> Vec<String> {
        if photo_refs.is_empty() {
            return Vec::new();
        }

        let fetches = photo_refs.iter().map(|photo_ref| async move {
            match tokio::time::timeout(per_photo_budget, self.fetch_photo_asset(photo_ref)).await {
                Ok(resolved) => resolved,
                Err(_) => {
                    tracing::warn!(
                        photo_ref = %photo_ref,
                        budget_ms = per_photo_budget.as_millis(),
                        "photo resolution timed out, dropping"
                    );
                    None
                }
            }
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }
}
