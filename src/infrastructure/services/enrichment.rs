//! Topic enrichment: expansion plus image resolution, fanned out and joined

use std::sync::Arc;

use futures::future::join_all;
use tracing::debug;

use crate::domain::{DomainError, EnrichedTopic, ExpansionResult, Image, TopicExpander};

use super::ImageResolver;

/// Composes the topic expander with the image resolver.
///
/// Expansion failures are fatal; image failures were already absorbed below,
/// so every enrichment that returns Ok carries the main-topic images and all
/// four related topics with an images field present. Caching is the caller's
/// concern.
#[derive(Debug)]
pub struct EnrichmentService {
    resolver: Arc<ImageResolver>,
    expander: Arc<dyn TopicExpander>,
}

impl EnrichmentService {
    pub fn new(resolver: Arc<ImageResolver>, expander: Arc<dyn TopicExpander>) -> Self {
        Self { resolver, expander }
    }

    pub async fn enrich(&self, topic: &str) -> Result<ExpansionResult, DomainError> {
        self.enrich_with_main_images(topic, None).await
    }

    /// Enriches a topic, optionally reusing already-fetched main-topic images
    /// (the orchestrator passes a neighbor's images when the user navigates
    /// to a topic already on screen).
    pub async fn enrich_with_main_images(
        &self,
        topic: &str,
        main_images: Option<Vec<Image>>,
    ) -> Result<ExpansionResult, DomainError> {
        let (main_topic_images, topics) = match main_images {
            Some(images) => (images, self.expander.expand(topic).await?),
            None => {
                let (images, expansion) =
                    tokio::join!(self.resolver.resolve(topic), self.expander.expand(topic));
                (images, expansion?)
            }
        };

        // Fan out the four per-topic resolutions; join_all keeps results
        // associated with their originating topic regardless of completion
        // order
        let enriched = join_all(topics.into_iter().map(|t| {
            let resolver = self.resolver.clone();
            async move {
                let images = resolver.resolve(&t.title).await;
                EnrichedTopic::new(t, images)
            }
        }))
        .await;

        debug!(
            topic,
            main_images = main_topic_images.len(),
            related = enriched.len(),
            "Enrichment complete"
        );

        Ok(ExpansionResult::new(main_topic_images, enriched))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::image::mock::MockImageSearch;
    use crate::domain::topic::mock::MockTopicExpander;
    use crate::domain::{Topic, RELATED_TOPIC_COUNT};

    fn four_topics() -> Vec<Topic> {
        (0..4)
            .map(|i| Topic::new(format!("related {}", i), format!("d{}", i)))
            .collect()
    }

    fn service(search: MockImageSearch, expander: MockTopicExpander) -> EnrichmentService {
        EnrichmentService::new(
            Arc::new(ImageResolver::new(Arc::new(search))),
            Arc::new(expander),
        )
    }

    #[tokio::test]
    async fn test_enrich_is_complete() {
        let search = MockImageSearch::new()
            .with_images("main topic", vec![Image::new("https://x/main.jpg")])
            .with_images("related 1", vec![Image::new("https://x/r1.png")]);
        let expander = MockTopicExpander::new().with_topics(four_topics());

        let result = service(search, expander).enrich("main topic").await.unwrap();

        assert_eq!(result.main_topic_images.len(), 1);
        assert_eq!(result.related_topics.len(), RELATED_TOPIC_COUNT);
        // Every related topic carries an images field, empty or not
        assert_eq!(result.related_topics[1].images.len(), 1);
        assert!(result.related_topics[0].images.is_empty());
    }

    #[tokio::test]
    async fn test_enrich_associates_images_with_their_topic() {
        let search = MockImageSearch::new()
            .with_images("related 0", vec![Image::new("https://x/r0.png")])
            .with_images("related 3", vec![Image::new("https://x/r3.png")]);
        let expander = MockTopicExpander::new().with_topics(four_topics());

        let result = service(search, expander).enrich("main").await.unwrap();

        assert_eq!(result.related_topics[0].title(), "related 0");
        assert_eq!(result.related_topics[0].images[0].url, "https://x/r0.png");
        assert_eq!(result.related_topics[3].images[0].url, "https://x/r3.png");
        assert!(result.related_topics[1].images.is_empty());
    }

    #[tokio::test]
    async fn test_single_topic_image_failure_does_not_fail_aggregate() {
        let search = MockImageSearch::new()
            .with_images("related 0", vec![Image::new("https://x/r0.png")])
            .with_error_for("related 2", "HTTP 500");
        let expander = MockTopicExpander::new().with_topics(four_topics());

        let result = service(search, expander).enrich("main").await.unwrap();

        assert_eq!(result.related_topics.len(), RELATED_TOPIC_COUNT);
        assert!(result.related_topics[2].images.is_empty());
        assert_eq!(result.related_topics[0].images.len(), 1);
    }

    #[tokio::test]
    async fn test_expander_failure_is_fatal() {
        let search = MockImageSearch::new();
        let expander = MockTopicExpander::new().with_error("model unavailable");

        let err = service(search, expander).enrich("main").await.unwrap_err();
        assert!(matches!(err, DomainError::Provider { .. }));
    }

    #[tokio::test]
    async fn test_reused_main_images_skip_the_main_fetch() {
        let search = Arc::new(MockImageSearch::new());
        let expander = MockTopicExpander::new().with_topics(four_topics());
        let service = EnrichmentService::new(
            Arc::new(ImageResolver::new(search.clone())),
            Arc::new(expander),
        );

        let reused = vec![Image::new("https://x/neighbor.jpg")];
        let result = service
            .enrich_with_main_images("main", Some(reused.clone()))
            .await
            .unwrap();

        assert_eq!(result.main_topic_images, reused);
        // Only the four related-topic lookups hit the provider
        assert_eq!(search.call_count(), RELATED_TOPIC_COUNT);
    }
}
