//! Domain layer - Core entities and capability traits

pub mod cache;
pub mod error;
pub mod image;
pub mod topic;

pub use cache::{canonical_query, CacheEntry, QueryCache};
pub use error::DomainError;
pub use image::{is_displayable_url, Image, ImageSearchProvider};
pub use topic::{
    validate_expansion, EnrichedTopic, ExpansionResult, Topic, TopicExpander, RELATED_TOPIC_COUNT,
};
