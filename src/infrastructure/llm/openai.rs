use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{validate_expansion, DomainError, Topic, TopicExpander};
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

const EXPANSION_FUNCTION: &str = "generate_related_topics";

/// Persona steering the model toward automotive/art cultural cross-references
const SYSTEM_PERSONA: &str = "You are a savvy coolhunter with expertise in cars and art, specializing in their cultural impact from the 1980s to 2024. Your mission is to uncover and showcase the fascinating connections between automobiles and artistic expression in pop culture, entertainment, and music. For any given topic, provide four related references that explore different facets of car-art relationships, focusing on unexpected or lesser-known connections. Use a casual yet articulate tone, as if you're chatting with a fellow enthusiast at a gallery opening in a converted auto shop. Your knowledge bank includes: Pop Art and Automotive Imagery: Explore how artists transformed everyday vehicles into symbols of popular culture, including album covers featuring iconic cars. Cars in Film and TV: Highlight the cultural impact of famous movie and TV cars, focusing on less obvious choices and their legacies. Music and Motors: Discuss bands named after cars and explore how racing drivers, especially from Formula One, are crossing over into the music world. Formula One's Cultural Acceleration: Analyze F1's growing influence on music and entertainment, including collaborations with artists and the presence of concerts at Grand Prix events. Artistic Automobiles: Showcase artists who use cars as their medium or subject matter in innovative ways. Exclude NASCAR references but include Formula One. Your goal is to create an engaging, interconnected web of car-art relationships that will expand users' knowledge with surprising and intriguing connections.";

/// OpenAI-backed topic expander
///
/// Issues a single function-call completion pinned to a fixed output schema
/// and validates the payload against the four-topic contract.
#[derive(Debug)]
pub struct OpenAiTopicExpander<C: HttpClientTrait> {
    client: C,
    api_key: String,
    model: String,
    base_url: String,
}

impl<C: HttpClientTrait> OpenAiTopicExpander<C> {
    pub fn new(client: C, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, model, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn build_request(&self, topic: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PERSONA },
                {
                    "role": "user",
                    "content": format!(
                        "Generate 4 related topics to \"{topic}\" with descriptions. \
                         Each topic should have a brief description explaining its \
                         relationship to {topic}."
                    )
                }
            ],
            "functions": [
                {
                    "name": EXPANSION_FUNCTION,
                    "description": "Generate related topics with descriptions",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "related_topics": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "title": {
                                            "type": "string",
                                            "description": "The title of the related topic"
                                        },
                                        "description": {
                                            "type": "string",
                                            "description": "A detailed description of how this topic relates to the main topic"
                                        }
                                    },
                                    "required": ["title", "description"],
                                    "additionalProperties": false
                                }
                            }
                        },
                        "required": ["related_topics"],
                        "additionalProperties": false
                    }
                }
            ],
            "function_call": { "name": EXPANSION_FUNCTION }
        })
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<Vec<Topic>, DomainError> {
        let response: OpenAiResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("openai", "No choices in response"))?;

        let call = choice
            .message
            .function_call
            .ok_or_else(|| DomainError::provider("openai", "No function call in response"))?;

        if call.name != EXPANSION_FUNCTION {
            return Err(DomainError::provider(
                "openai",
                format!("Unexpected function call '{}'", call.name),
            ));
        }

        let payload: ExpansionPayload = serde_json::from_str(&call.arguments).map_err(|e| {
            DomainError::provider("openai", format!("Malformed function arguments: {}", e))
        })?;

        validate_expansion("openai", &payload.related_topics)?;

        Ok(payload.related_topics)
    }
}

#[async_trait]
impl<C: HttpClientTrait> TopicExpander for OpenAiTopicExpander<C> {
    async fn expand(&self, topic: &str) -> Result<Vec<Topic>, DomainError> {
        if self.api_key.trim().is_empty() {
            return Err(DomainError::credential(
                "OpenAI API key is not configured; topic expansion is unavailable",
            ));
        }

        let url = self.chat_completions_url();
        let body = self.build_request(topic);
        let auth_header = format!("Bearer {}", self.api_key);
        let headers = vec![
            ("Authorization", auth_header.as_str()),
            ("Content-Type", "application/json"),
        ];

        let response = self.client.post_json(&url, headers, &body).await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

// OpenAI API types

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    function_call: Option<OpenAiFunctionCall>,
}

#[derive(Debug, Deserialize)]
struct OpenAiFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ExpansionPayload {
    related_topics: Vec<Topic>,
}
