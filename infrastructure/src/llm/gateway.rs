//! OpenAI-compatible chat-completions gateway.
//!
//! Implements [`LlmGateway`] against any endpoint speaking the
//! `/chat/completions` wire format. The API key is read from the
//! environment at construction time and never appears in configuration
//! files.

use async_trait::async_trait;
use quadbot_application::{CompletionRequest, GatewayError, LlmGateway};
use quadbot_domain::Message;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// TCP connection timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
}

#[derive(Debug, Deserialize)]
struct WireResponseMessage {
    content: Option<String>,
}

pub struct OpenAiChatGateway {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiChatGateway {
    /// Build the gateway. `api_key_env` names the environment variable that
    /// holds the key; a missing variable is an error at startup rather than
    /// at first request.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key_env: &str,
        timeout_secs: u64,
    ) -> Result<Self, GatewayError> {
        let api_key = std::env::var(api_key_env).map_err(|_| {
            GatewayError::RequestFailed(format!(
                "environment variable {api_key_env} is not set"
            ))
        })?;

        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
        })
    }

    fn wire_messages(messages: &[Message]) -> Vec<WireMessage<'_>> {
        messages
            .iter()
            .map(|m| WireMessage {
                role: m.role.as_str(),
                content: &m.content,
            })
            .collect()
    }

    /// Extract the assistant text from a parsed response body.
    fn extract_content(response: WireResponse) -> Result<String, GatewayError> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                GatewayError::MalformedResponse("response contained no completion text".to_string())
            })
    }
}

#[async_trait]
impl LlmGateway for OpenAiChatGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = WireRequest {
            model: &self.model,
            messages: Self::wire_messages(&request.messages),
            temperature: request.temperature,
        };
        debug!(model = %self.model, messages = request.messages.len(), "sending completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else if e.is_connect() {
                    GatewayError::ConnectionError(e.to_string())
                } else {
                    GatewayError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::HttpStatus(status.as_u16()));
        }

        let parsed: WireResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
        Self::extract_content(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<String, GatewayError> {
        let parsed: WireResponse = serde_json::from_str(body)
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
        OpenAiChatGateway::extract_content(parsed)
    }

    #[test]
    fn test_extract_completion_text() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "{\"final_answer\": \"hi\"}"}}
            ]
        }"#;
        assert_eq!(parse(body).unwrap(), "{\"final_answer\": \"hi\"}");
    }

    #[test]
    fn test_empty_choices_is_malformed() {
        assert!(matches!(
            parse(r#"{"choices": []}"#),
            Err(GatewayError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_null_content_is_malformed() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        assert!(matches!(parse(body), Err(GatewayError::MalformedResponse(_))));
    }

    #[test]
    fn test_missing_env_var_fails_at_construction() {
        let result =
            OpenAiChatGateway::new("https://api.example.com/v1", "gpt-4o-mini", "QUADBOT_TEST_UNSET_KEY", 10);
        assert!(result.is_err());
    }
}
