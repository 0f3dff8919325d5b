//! Topic navigation: cache-first resolution with last-query-wins semantics

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{
    canonical_query, DomainError, EnrichedTopic, ExpansionResult, QueryCache,
};

use super::EnrichmentService;

/// Serves topic-change requests: prefers the cache, falls back to live
/// enrichment, and populates the cache on a miss.
///
/// A generation counter makes the latest query win: an enrichment that
/// finishes after a newer query started is discarded and never cached.
#[derive(Debug)]
pub struct NavigationService {
    cache: Arc<dyn QueryCache>,
    enrichment: Arc<EnrichmentService>,
    generation: AtomicU64,
}

impl NavigationService {
    pub fn new(cache: Arc<dyn QueryCache>, enrichment: Arc<EnrichmentService>) -> Self {
        Self {
            cache,
            enrichment,
            generation: AtomicU64::new(0),
        }
    }

    /// Resolves a topic change.
    ///
    /// `current_related` are the neighbors currently on screen; when the new
    /// query matches one by title, its already-fetched images stand in for a
    /// fresh main-topic lookup.
    pub async fn resolve_topic(
        &self,
        query: &str,
        current_related: Option<&[EnrichedTopic]>,
    ) -> Result<ExpansionResult, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::validation("Search query is required"));
        }

        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        match self.cache.get(query).await {
            Ok(Some(hit)) => {
                debug!(query, "Serving expansion from cache");
                return Ok(hit);
            }
            Ok(None) => {}
            // The cache is an optimization; a broken store degrades to live
            // computation
            Err(e) => warn!(query, error = %e, "Cache lookup failed, computing live"),
        }

        let key = canonical_query(query);
        let neighbor_images = current_related.and_then(|topics| {
            topics
                .iter()
                .find(|t| canonical_query(t.title()) == key)
                .map(|t| t.images.clone())
        });

        let result = self
            .enrichment
            .enrich_with_main_images(query, neighbor_images)
            .await?;

        if self.generation.load(Ordering::SeqCst) != token {
            debug!(query, "Discarding stale expansion result");
            return Err(DomainError::superseded(format!(
                "Query '{}' was superseded by a newer request",
                query
            )));
        }

        if let Err(e) = self.cache.put(query, result.clone()).await {
            warn!(query, error = %e, "Failed to cache expansion result");
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::cache::mock::MockQueryCache;
    use crate::domain::image::mock::MockImageSearch;
    use crate::domain::topic::mock::MockTopicExpander;
    use crate::domain::{Image, Topic};
    use crate::infrastructure::services::ImageResolver;

    fn enrichment(search: MockImageSearch, expander: Arc<MockTopicExpander>) -> Arc<EnrichmentService> {
        Arc::new(EnrichmentService::new(
            Arc::new(ImageResolver::new(Arc::new(search))),
            expander,
        ))
    }

    fn cached_result() -> ExpansionResult {
        ExpansionResult::new(
            vec![Image::new("https://x/cached.jpg")],
            vec![EnrichedTopic::new(Topic::new("cached", "d"), vec![])],
        )
    }

    #[tokio::test]
    async fn test_cache_hit_skips_expansion() {
        let expander = Arc::new(MockTopicExpander::new().with_default_topics("Kenny Scharf Cars"));
        let cache = Arc::new(MockQueryCache::new().with_entry("Kenny Scharf Cars", cached_result()));
        let service = NavigationService::new(
            cache,
            enrichment(MockImageSearch::new(), expander.clone()),
        );

        let result = service
            .resolve_topic("Kenny Scharf Cars", None)
            .await
            .unwrap();

        assert_eq!(result, cached_result());
        assert_eq!(expander.call_count(), 0);
    }

    #[tokio::test]
    async fn test_cache_miss_computes_and_populates() {
        let expander = Arc::new(MockTopicExpander::new().with_default_topics("new topic"));
        let cache = Arc::new(MockQueryCache::new());
        let service = NavigationService::new(
            cache.clone(),
            enrichment(MockImageSearch::new(), expander.clone()),
        );

        let result = service.resolve_topic("new topic", None).await.unwrap();

        assert_eq!(result.related_topics.len(), 4);
        assert_eq!(expander.call_count(), 1);
        assert_eq!(cache.get("new topic").await.unwrap(), Some(result));
    }

    #[tokio::test]
    async fn test_expansion_failure_writes_nothing() {
        let expander = Arc::new(MockTopicExpander::new().with_error("malformed output"));
        let cache = Arc::new(MockQueryCache::new());
        let service = NavigationService::new(
            cache.clone(),
            enrichment(MockImageSearch::new(), expander),
        );

        let err = service.resolve_topic("failing topic", None).await.unwrap_err();

        assert!(matches!(err, DomainError::Provider { .. }));
        assert_eq!(cache.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected() {
        let expander = Arc::new(MockTopicExpander::new());
        let service = NavigationService::new(
            Arc::new(MockQueryCache::new()),
            enrichment(MockImageSearch::new(), expander),
        );

        let err = service.resolve_topic("   ", None).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_neighbor_images_are_reused() {
        let expander = Arc::new(MockTopicExpander::new().with_default_topics("neighbor"));
        let search = Arc::new(MockImageSearch::new());
        let service = NavigationService::new(
            Arc::new(MockQueryCache::new()),
            Arc::new(EnrichmentService::new(
                Arc::new(ImageResolver::new(search.clone())),
                expander,
            )),
        );

        let neighbor = EnrichedTopic::new(
            Topic::new("Neighbor Topic", "already on screen"),
            vec![Image::new("https://x/neighbor.jpg")],
        );

        let result = service
            .resolve_topic("neighbor topic", Some(&[neighbor]))
            .await
            .unwrap();

        assert_eq!(result.main_topic_images[0].url, "https://x/neighbor.jpg");
        // Four related lookups only; the main fetch was skipped
        assert_eq!(search.call_count(), 4);
    }

    #[tokio::test]
    async fn test_cache_error_degrades_to_live_computation() {
        let expander = Arc::new(MockTopicExpander::new().with_default_topics("topic"));
        let cache = Arc::new(MockQueryCache::new().with_error("disk corrupted"));
        let service = NavigationService::new(
            cache,
            enrichment(MockImageSearch::new(), expander.clone()),
        );

        let result = service.resolve_topic("topic", None).await.unwrap();

        assert_eq!(result.related_topics.len(), 4);
        assert_eq!(expander.call_count(), 1);
    }

    #[tokio::test]
    async fn test_stale_completion_is_discarded() {
        let expander = Arc::new(
            MockTopicExpander::new()
                .with_default_topics("any")
                .with_delay(Duration::from_millis(50)),
        );
        let cache = Arc::new(MockQueryCache::new());
        let service = Arc::new(NavigationService::new(
            cache.clone(),
            enrichment(MockImageSearch::new(), expander),
        ));

        // Query A starts first but its expansion resolves slowly; query B
        // starts while A is in flight and finishes after A's token is stale
        let slow = {
            let service = service.clone();
            tokio::spawn(async move { service.resolve_topic("query a", None).await })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;

        let fast = service.resolve_topic("query b", None).await;
        let slow = slow.await.unwrap();

        assert!(fast.is_ok());
        assert!(matches!(slow.unwrap_err(), DomainError::Superseded { .. }));

        // Final state reflects B only
        assert!(cache.get("query a").await.unwrap().is_none());
        assert!(cache.get("query b").await.unwrap().is_some());
    }
}
