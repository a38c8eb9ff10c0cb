//! GeminiAssistant - Direct REST API implementation for Gemini.
//!
//! Calls the Gemini REST API directly without CLI dependency. The full
//! turn history is mapped onto Gemini's alternating user/model contents;
//! persona seed turns ride along as the leading user/model pair, the same
//! shape the chat frontend originally established them with.

use async_trait::async_trait;
use neuroscan_core::assistant::{AssistantBackend, AssistantError};
use neuroscan_core::chat::{ConversationTurn, TurnRole};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Assistant backend that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiAssistant {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiAssistant {
    /// Creates a backend with the provided API key and model.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Hard bound on each generation call; on expiry the
    ///   caller degrades to its fallback reply
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AssistantError::Request {
                message: format!("failed to build HTTP client: {}", e),
                is_retryable: false,
            })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    async fn send_request(
        &self,
        body: &GenerateContentRequest,
    ) -> Result<String, AssistantError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| AssistantError::Request {
                message: format!("Gemini API request failed: {}", err),
                is_retryable: err.is_connect() || err.is_timeout(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|err| AssistantError::Request {
                message: format!("failed to parse Gemini response: {}", err),
                is_retryable: false,
            })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl AssistantBackend for GeminiAssistant {
    async fn generate(
        &self,
        turns: &[ConversationTurn],
        max_output_tokens: u32,
    ) -> Result<String, AssistantError> {
        let request = GenerateContentRequest {
            contents: turns.iter().map(turn_to_content).collect(),
            generation_config: GenerationConfig { max_output_tokens },
        };

        debug!(model = %self.model, turns = turns.len(), "sending generation request");
        self.send_request(&request).await
    }
}

fn turn_to_content(turn: &ConversationTurn) -> Content {
    // Gemini multi-turn contents only know "user" and "model"; system
    // instructions travel as a leading user turn, mirroring how the
    // persona seed pair is laid out in the session.
    let role = match turn.role {
        TurnRole::System | TurnRole::User => "user",
        TurnRole::Assistant => "model",
    };
    Content {
        role: role.to_string(),
        parts: vec![Part {
            text: turn.content.clone(),
        }],
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, AssistantError> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or(AssistantError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> AssistantError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{}: {}", status_text, msg)
            }
        })
        .unwrap_or_else(|_| body.clone());

    AssistantError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_roles_map_onto_gemini_vocabulary() {
        let turns = [
            ConversationTurn::new(TurnRole::System, "persona", Utc::now()),
            ConversationTurn::new(TurnRole::Assistant, "ack", Utc::now()),
            ConversationTurn::new(TurnRole::User, "hello", Utc::now()),
        ];

        let contents: Vec<Content> = turns.iter().map(turn_to_content).collect();

        assert_eq!(contents[0].role, "user");
        assert_eq!(contents[1].role, "model");
        assert_eq!(contents[2].role, "user");
        assert_eq!(contents[2].parts[0].text, "hello");
    }

    #[test]
    fn test_extract_text_takes_last_candidate_text() {
        let response = GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: Some(ContentResponse {
                    parts: vec![PartResponse {
                        text: Some("a reply".to_string()),
                    }],
                }),
            }]),
        };

        assert_eq!(extract_text_response(response).unwrap(), "a reply");
    }

    #[test]
    fn test_extract_text_empty_candidates_is_empty_response() {
        let response = GenerateContentResponse { candidates: None };

        assert!(matches!(
            extract_text_response(response),
            Err(AssistantError::EmptyResponse)
        ));
    }

    #[test]
    fn test_map_http_error_parses_structured_body() {
        let body = r#"{"error":{"message":"quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;

        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body.to_string());

        match err {
            AssistantError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "RESOURCE_EXHAUSTED: quota exceeded");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_api_5xx_and_429_are_retryable() {
        let err = map_http_error(StatusCode::SERVICE_UNAVAILABLE, "down".to_string());
        assert!(err.is_retryable());

        let err = map_http_error(StatusCode::BAD_REQUEST, "bad".to_string());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_generation_request_serializes_output_cap() {
        let request = GenerateContentRequest {
            contents: vec![],
            generation_config: GenerationConfig {
                max_output_tokens: 500,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 500);
    }
}
