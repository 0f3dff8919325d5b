use std::fmt::Debug;

use async_trait::async_trait;

use super::Image;
use crate::domain::DomainError;

/// Trait for image-search capabilities (Serper, etc.)
///
/// Implementations map raw provider records into [`Image`] values in the
/// provider's relevance order. Errors are surfaced here; the resolver layer
/// above decides that they degrade to an empty result.
#[async_trait]
pub trait ImageSearchProvider: Send + Sync + Debug {
    /// Search for images matching the query
    async fn search(&self, query: &str) -> Result<Vec<Image>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
