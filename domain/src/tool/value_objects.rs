//! Tool value objects — immutable result and error types.
//!
//! Every tool invocation produces a [`ToolResult`]: the output text fed back
//! into planning as an observation, or a [`ToolError`] formatted into an
//! observation string. Tool failures never abort the turn; only the step
//! budget does.

use serde::{Deserialize, Serialize};

/// Error produced by a tool invocation.
///
/// | Code | Meaning |
/// |------|---------|
/// | `UNKNOWN_TOOL` | Planner requested a name not in the registry |
/// | `INVALID_ARGUMENT` | Missing/extra/mistyped parameters |
/// | `GATEWAY_FAILED` | Upstream HTTP call failed (includes status code) |
/// | `TIMEOUT` | Upstream call exceeded its bounded timeout |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "UNKNOWN_TOOL")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::new("UNKNOWN_TOOL", format!("Unknown tool: {}", name.into()))
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn gateway_failed(message: impl Into<String>) -> Self {
        Self::new("GATEWAY_FAILED", message)
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            "TIMEOUT",
            format!("Operation timed out: {}", operation.into()),
        )
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Result of a tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was invoked
    pub tool_name: String,
    /// Whether the invocation succeeded
    pub success: bool,
    /// Output content (for successful invocations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Error information (for failed invocations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: Some(output.into()),
            error: None,
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// The observation string appended to the conversation: output on
    /// success, a formatted error string on failure.
    pub fn observation(&self) -> String {
        if let Some(output) = self.output() {
            output.to_string()
        } else if let Some(error) = self.error() {
            format!("Tool '{}' failed: {}", self.tool_name, error)
        } else {
            format!("Tool '{}' returned no output", self.tool_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_result_success() {
        let result = ToolResult::success("get_people", "directory records");
        assert!(result.is_success());
        assert_eq!(result.output(), Some("directory records"));
        assert!(result.error().is_none());
        assert_eq!(result.observation(), "directory records");
    }

    #[test]
    fn test_tool_result_failure_observation_contains_code() {
        let result = ToolResult::failure(
            "get_campus_events",
            ToolError::gateway_failed("request failed with status 500"),
        );
        assert!(!result.is_success());
        let obs = result.observation();
        assert!(obs.contains("500"));
        assert!(obs.contains("get_campus_events"));
    }

    #[test]
    fn test_unknown_tool_error() {
        let err = ToolError::unknown_tool("frobnicate");
        assert_eq!(err.code, "UNKNOWN_TOOL");
        assert!(err.to_string().contains("frobnicate"));
    }
}
