use serde::{Deserialize, Serialize};

use crate::domain::image::Image;

/// A related subject produced by topic expansion.
///
/// The title doubles as the natural key for cache lookups and for matching a
/// topic against previously resolved image sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub title: String,
    pub description: String,
}

impl Topic {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Both fields carry non-whitespace content
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// A topic with its resolved images attached. The image list may be empty but
/// is never absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTopic {
    #[serde(flatten)]
    pub topic: Topic,
    pub images: Vec<Image>,
}

impl EnrichedTopic {
    pub fn new(topic: Topic, images: Vec<Image>) -> Self {
        Self { topic, images }
    }

    pub fn title(&self) -> &str {
        &self.topic.title
    }
}

/// The full outcome of expanding one query: images for the query itself plus
/// the four enriched related topics. This is the unit stored in the cache.
///
/// Field names follow the wire format the front end consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionResult {
    #[serde(rename = "mainTopicImages")]
    pub main_topic_images: Vec<Image>,
    pub related_topics: Vec<EnrichedTopic>,
}

impl ExpansionResult {
    pub fn new(main_topic_images: Vec<Image>, related_topics: Vec<EnrichedTopic>) -> Self {
        Self {
            main_topic_images,
            related_topics,
        }
    }
}
