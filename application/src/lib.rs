//! Application layer for quadbot
//!
//! Use cases (the semantic filter mapper and the turn orchestrator) plus
//! the ports they depend on. Implementations of the ports live in the
//! infrastructure layer and are injected by the binary.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::campus_api::{CampusApiPort, EventsQuery, FeedType};
pub use ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
pub use ports::tool_executor::ToolExecutorPort;
pub use ports::web_search::{SearchQuery, WebSearchPort};
pub use use_cases::map_filters::MapFiltersUseCase;
pub use use_cases::run_turn::{RunTurnError, RunTurnInput, RunTurnOutput, RunTurnUseCase};
