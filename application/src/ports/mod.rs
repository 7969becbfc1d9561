//! Ports (interfaces) implemented by infrastructure adapters.

pub mod campus_api;
pub mod llm_gateway;
pub mod tool_executor;
pub mod web_search;
