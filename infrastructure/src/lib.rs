//! Infrastructure layer for quadbot
//!
//! Adapters behind the application-layer ports: TOML/figment configuration,
//! vocabulary file loading, the OpenAI-compatible chat-completions client,
//! the campus REST gateways, the SerpAPI search gateway, and the tool
//! executor that dispatches planner calls.

pub mod config;
pub mod gateways;
pub mod llm;
pub mod tools;
pub mod vocab;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use gateways::campus::CampusHttpGateway;
pub use gateways::serp::SerpSearchGateway;
pub use llm::OpenAiChatGateway;
pub use tools::{default_tool_spec, CampusToolExecutor};
pub use vocab::load_vocabulary;
