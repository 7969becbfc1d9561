//! Tool executor port
//!
//! The orchestrator only sees this surface: a catalog of callable tools and
//! one dispatch method. Execution never returns an `Err` — every failure is
//! folded into a [`ToolResult`] so the planning loop can observe it and
//! continue.

use async_trait::async_trait;
use quadbot_domain::{ToolCall, ToolResult, ToolSpec};

#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// The registry of tools this executor can dispatch.
    fn tool_spec(&self) -> &ToolSpec;

    /// Execute one tool call. Infallible at the type level: unknown tools,
    /// invalid arguments, and gateway failures all come back as failed
    /// results carrying an error code.
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}
