//! LLM gateway adapter.

mod gateway;

pub use gateway::OpenAiChatGateway;
