//! Image resolution with the soft-failure policy
//!
//! "No images" is a valid, non-exceptional outcome: any provider or
//! transport error degrades to an empty list so the pipeline above never has
//! to special-case image failures.

use std::sync::Arc;

use tracing::warn;

use crate::domain::{Image, ImageSearchProvider};

#[derive(Debug)]
pub struct ImageResolver {
    provider: Arc<dyn ImageSearchProvider>,
}

impl ImageResolver {
    pub fn new(provider: Arc<dyn ImageSearchProvider>) -> Self {
        Self { provider }
    }

    /// Resolves a filtered image list for the query.
    ///
    /// Records failing the URL invariant are dropped silently; provider
    /// errors are absorbed into an empty result. Ordering is the provider's
    /// relevance order, passed through unchanged. No retry.
    pub async fn resolve(&self, query: &str) -> Vec<Image> {
        match self.provider.search(query).await {
            Ok(images) => images
                .into_iter()
                .filter(Image::has_displayable_url)
                .collect(),
            Err(e) => {
                warn!(
                    provider = self.provider.provider_name(),
                    query, error = %e,
                    "Image search failed, continuing with no images"
                );
                Vec::new()
            }
        }
    }
}
