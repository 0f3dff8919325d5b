use std::fmt::Debug;

use async_trait::async_trait;

use super::{Topic, RELATED_TOPIC_COUNT};
use crate::domain::DomainError;

/// Trait for topic expansion capabilities (OpenAI, etc.)
///
/// A successful expansion returns exactly [`RELATED_TOPIC_COUNT`] complete
/// topics; anything else is a provider error. Expansion is a hard dependency
/// of the pipeline, so implementations propagate failures instead of
/// degrading.
#[async_trait]
pub trait TopicExpander: Send + Sync + Debug {
    /// Generate the related topics for the given subject
    async fn expand(&self, topic: &str) -> Result<Vec<Topic>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

/// Validates a provider's expansion payload against the contract.
pub fn validate_expansion(provider: &str, topics: &[Topic]) -> Result<(), DomainError> {
    if topics.len() != RELATED_TOPIC_COUNT {
        return Err(DomainError::provider(
            provider,
            format!(
                "Expected {} related topics, got {}",
                RELATED_TOPIC_COUNT,
                topics.len()
            ),
        ));
    }

    if let Some(incomplete) = topics.iter().find(|t| !t.is_complete()) {
        return Err(DomainError::provider(
            provider,
            format!(
                "Related topic '{}' is missing a title or description",
                incomplete.title
            ),
        ));
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn four_topics() -> Vec<Topic> {
        (0..4)
            .map(|i| Topic::new(format!("t{}", i), format!("d{}", i)))
            .collect()
    }

    #[test]
    fn test_validate_expansion_accepts_four_complete_topics() {
        assert!(validate_expansion("mock", &four_topics()).is_ok());
    }

    #[test]
    fn test_validate_expansion_rejects_wrong_count() {
        let mut topics = four_topics();
        topics.pop();
        assert!(validate_expansion("mock", &topics).is_err());

        let mut topics = four_topics();
        topics.push(Topic::new("t4", "d4"));
        assert!(validate_expansion("mock", &topics).is_err());
    }

    #[test]
    fn test_validate_expansion_rejects_incomplete_topic() {
        let mut topics = four_topics();
        topics[2].description = String::new();
        assert!(validate_expansion("mock", &topics).is_err());
    }
}
