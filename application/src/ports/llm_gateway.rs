//! LLM Gateway port
//!
//! Defines the interface for chat-completion calls against a language
//! model provider. Both the planner and the filter mapper go through this
//! port; the adapter lives in the infrastructure layer.

use async_trait::async_trait;
use quadbot_domain::Message;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed with status {0}")]
    HttpStatus(u16),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// A single completion request.
///
/// Temperature is pinned to the most deterministic setting (0.0) by
/// default; repeated identical requests should be stable in practice, but
/// model nondeterminism is an accepted external risk.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            temperature: 0.0,
        }
    }
}

/// Gateway for LLM chat completions.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a completion request and return the model's text response.
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError>;
}
