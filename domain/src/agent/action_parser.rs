//! Planner action parsing from LLM responses.
//!
//! The planner is instructed to answer with a single JSON object, either
//! a tool invocation or a final answer, optionally inside a fenced
//! ` ```action ` block:
//!
//! ```json
//! {"tool": "get_people", "args": {"name": "Ada Lovelace"}, "reasoning": "..."}
//! {"final_answer": "There are three AI events this week."}
//! ```
//!
//! Plain prose with no JSON anywhere is treated as a final answer — models
//! routinely skip the wrapper when they are done. A response that *looks*
//! structured but cannot be interpreted is a recoverable
//! [`ActionParseError`]: the orchestrator converts it into a synthetic
//! observation and replans, consuming one step of the budget.

use crate::tool::entities::ToolCall;
use thiserror::Error;

/// The planner's chosen next action for a turn.
#[derive(Debug, Clone)]
pub enum PlannerAction {
    /// Invoke a tool and observe its result
    ToolCall(ToolCall),
    /// Produce the final answer for this turn
    FinalAnswer(String),
}

/// Recoverable planner-output parse failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("planner returned an empty response")]
    Empty,

    #[error("planner response contained malformed JSON: {0}")]
    MalformedJson(String),

    #[error("planner JSON had neither 'tool' nor 'final_answer': {0}")]
    UnrecognizedShape(String),
}

/// Parse the planner's raw response into a [`PlannerAction`].
pub fn parse_planner_action(response: &str) -> Result<PlannerAction, ActionParseError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(ActionParseError::Empty);
    }

    // 1. Fenced ```action / ```json block
    if let Some(block) = extract_fenced_block(trimmed) {
        let value: serde_json::Value = serde_json::from_str(&block)
            .map_err(|e| ActionParseError::MalformedJson(e.to_string()))?;
        return interpret_json(&value);
    }

    // 2. The entire response as raw JSON
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return interpret_json(&value);
    }

    // 3. A response that opens a JSON object but fails to parse is treated
    //    as malformed rather than prose.
    if trimmed.starts_with('{') {
        return Err(ActionParseError::MalformedJson(
            "unterminated or invalid JSON object".to_string(),
        ));
    }

    // 4. Plain prose — the model answered directly
    Ok(PlannerAction::FinalAnswer(trimmed.to_string()))
}

/// Extract the contents of the first ```action or ```json fenced block.
fn extract_fenced_block(response: &str) -> Option<String> {
    let mut in_block = false;
    let mut block = String::new();

    for line in response.lines() {
        let marker = line.trim();
        if !in_block && (marker == "```action" || marker == "```json") {
            in_block = true;
        } else if in_block && marker == "```" {
            return Some(block);
        } else if in_block {
            block.push_str(line);
            block.push('\n');
        }
    }
    None
}

fn interpret_json(value: &serde_json::Value) -> Result<PlannerAction, ActionParseError> {
    if let Some(answer) = value.get("final_answer").and_then(|v| v.as_str()) {
        return Ok(PlannerAction::FinalAnswer(answer.to_string()));
    }

    let tool = value.get("tool").and_then(|v| v.as_str()).unwrap_or("");
    if tool.is_empty() || tool == "null" {
        return Err(ActionParseError::UnrecognizedShape(
            serde_json::to_string(value).unwrap_or_default(),
        ));
    }

    let mut call = ToolCall::new(tool);
    if let Some(args) = value.get("args").and_then(|v| v.as_object()) {
        for (key, arg) in args {
            call = call.with_arg(key, arg.clone());
        }
    }
    if let Some(reasoning) = value.get("reasoning").and_then(|v| v.as_str()) {
        call = call.with_reasoning(reasoning);
    }

    Ok(PlannerAction::ToolCall(call))
}
