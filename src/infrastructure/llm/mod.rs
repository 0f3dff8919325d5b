//! Language-model provider implementations

mod openai;

pub use openai::OpenAiTopicExpander;
