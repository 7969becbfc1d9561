//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Definition of a tool the planner can invoke
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "get_campus_events")
    pub name: String,
    /// Natural-language description consumed by the planner
    pub description: String,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description, including any controlled-list constraint
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type hint (e.g., "string", "integer", "boolean")
    pub param_type: String,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

/// The registry of available tools.
///
/// Constructed once at startup, immutable afterwards. Keeps registration
/// order so the planner prompt lists tools deterministically.
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: Vec<ToolDefinition>,
    /// Alias → canonical name mapping (e.g. "get_events" → "get_campus_events")
    aliases: HashMap<String, String>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.push(tool);
        self
    }

    /// Register a single alias mapping (builder pattern)
    pub fn register_alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), canonical.into());
        self
    }

    /// Resolve a name: returns the canonical name if it's a registered tool,
    /// or resolves an alias, or None if unknown
    pub fn resolve<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if self.tools.iter().any(|t| t.name == name) {
            Some(name)
        } else {
            self.aliases.get(name).map(|s| s.as_str())
        }
    }

    /// Get tool definition by exact canonical name
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Get tool definition by canonical name or alias
    pub fn get_resolved(&self, name: &str) -> Option<&ToolDefinition> {
        self.resolve(name).and_then(|canonical| self.get(canonical))
    }

    /// All definitions in registration order
    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }
}

/// A call to a tool with arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    pub arguments: HashMap<String, serde_json::Value>,
    /// Optional reasoning from the planner for why this tool was chosen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
            reasoning: None,
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }

    /// Get an optional i64 argument
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.arguments.get(key).and_then(|v| v.as_i64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definition_builder() {
        let tool = ToolDefinition::new("get_people", "Look up directory records")
            .with_parameter(ToolParameter::new("name", "Name to search for", true));

        assert_eq!(tool.name, "get_people");
        assert_eq!(tool.parameters.len(), 1);
        assert!(tool.parameters[0].required);
    }

    #[test]
    fn test_tool_spec_registration_order() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("a", "first"))
            .register(ToolDefinition::new("b", "second"));

        let names: Vec<&str> = spec.names().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(spec.get("a").is_some());
        assert!(spec.get("unknown").is_none());
    }

    #[test]
    fn test_tool_spec_aliases() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("get_campus_events", "Fetch events"))
            .register_alias("get_events", "get_campus_events");

        assert_eq!(spec.resolve("get_events"), Some("get_campus_events"));
        assert_eq!(spec.resolve("get_campus_events"), Some("get_campus_events"));
        assert_eq!(spec.resolve("unknown"), None);
        assert_eq!(spec.get_resolved("get_events").unwrap().name, "get_campus_events");
        // get() is exact match only
        assert!(spec.get("get_events").is_none());
    }

    #[test]
    fn test_canonical_name_takes_priority_over_alias() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("search", "Canonical search"))
            .register(ToolDefinition::new("web_search", "Web search"))
            .register_alias("search", "web_search");

        assert_eq!(spec.resolve("search"), Some("search"));
        assert_eq!(spec.get_resolved("search").unwrap().name, "search");
    }

    #[test]
    fn test_tool_call_arguments() {
        let call = ToolCall::new("get_curriculum_by_subject")
            .with_arg("subject", "COMPSCI - Computer Science")
            .with_reasoning("User asked about CS courses");

        assert_eq!(call.get_string("subject"), Some("COMPSCI - Computer Science"));
        assert_eq!(call.require_string("subject").unwrap(), "COMPSCI - Computer Science");
        assert!(call.require_string("missing").is_err());
        assert!(call.get_i64("subject").is_none());
    }
}
