//! Topic entities and the expansion capability trait

mod entity;
mod expander;

pub use entity::{EnrichedTopic, ExpansionResult, Topic};
pub use expander::{validate_expansion, TopicExpander};

#[cfg(test)]
pub use expander::mock;

/// Number of related topics every successful expansion carries
pub const RELATED_TOPIC_COUNT: usize = 4;
