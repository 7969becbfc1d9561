//! Tool validation traits.
//!
//! Validation here covers argument presence and shape only. When a
//! parameter is constrained to a controlled list, membership is resolved
//! upstream by the format resolvers or the semantic filter mapper; the
//! registry does not re-check it at dispatch.

use super::entities::{ToolCall, ToolDefinition};

/// Validator for tool calls
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        // All required parameters must be present
        for param in &definition.parameters {
            if param.required && !call.arguments.contains_key(&param.name) {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        // All provided arguments must be declared parameters
        let valid_params: std::collections::HashSet<&str> =
            definition.parameters.iter().map(|p| p.name.as_str()).collect();

        for arg_name in call.arguments.keys() {
            if !valid_params.contains(arg_name.as_str()) {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            }
        }

        Ok(())
    }
}
