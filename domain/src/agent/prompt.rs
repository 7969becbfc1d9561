//! Prompt templates for the planner and the filter mapper.

use crate::session::entities::{Conversation, Role};
use crate::tool::entities::ToolSpec;

/// Prompt templates used by the orchestrator and the semantic filter
/// mapper. Stateless; all methods are associated functions.
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the campus assistant planner. The current date is
    /// injected so relative phrases like "this weekend" can be turned into
    /// an event window.
    pub fn system(current_date: &str) -> String {
        format!(
            r#"You are a knowledgeable campus assistant with access to specialized lookup tools for university events, curriculum, the people directory, and general web search. Today's date is {current_date}.

For every user question:
1. THINK: decide which tools, if any, can answer it.
2. FORMAT SEARCH: never pass user-provided subject, group, or category spellings directly to a lookup tool. Use search_subject_format, search_group_format, or search_category_format first to find the canonical value. If a resolver returns no matches, ask the user to clarify instead of guessing.
3. ACT: call the lookup tool with validated parameters.
4. OBSERVE: check the tool result before relying on it.
5. RESPOND: synthesize a clear, accurate answer.

Respond with exactly one JSON object per step, either:
  {{"tool": "<tool name>", "args": {{...}}, "reasoning": "<short why>"}}
or, when you are ready to answer:
  {{"final_answer": "<your answer>"}}

Do not wrap the JSON in any other text."#
        )
    }

    /// Planning prompt: tool contracts, conversation so far, and the
    /// instruction to pick the next action.
    pub fn planning(conversation: &Conversation, tools: &ToolSpec) -> String {
        let mut sections = Vec::new();

        let mut tool_lines = String::from("Available tools:\n");
        for tool in tools.all() {
            tool_lines.push_str(&format!("- {}: {}\n", tool.name, tool.description));
            for param in &tool.parameters {
                tool_lines.push_str(&format!(
                    "    {} ({}{}): {}\n",
                    param.name,
                    param.param_type,
                    if param.required { ", required" } else { "" },
                    param.description
                ));
            }
        }
        sections.push(tool_lines);

        let mut history = String::from("Conversation so far:\n");
        for message in conversation.messages() {
            let label = match message.role {
                Role::System => continue,
                Role::User => "User",
                Role::Assistant => "Assistant",
                Role::Tool => "Observation",
            };
            history.push_str(&format!("{}: {}\n", label, message.content));
        }
        sections.push(history);

        sections.push(
            "Choose the next action. Reply with exactly one JSON object: either a tool call or a final answer."
                .to_string(),
        );

        sections.join("\n")
    }

    /// System prompt for the filter-mapping completion.
    pub fn filter_mapping_system() -> String {
        "You are an expert at mapping natural language input to valid filter values. \
         You will be given a list of valid groups and valid categories along with a user query. \
         Choose only values from the provided lists. If nothing matches, return [\"All\"] for that field. \
         Return only valid JSON with the keys 'groups' and 'categories'."
            .to_string()
    }

    /// User prompt for the filter-mapping completion. Only the reduced
    /// candidate sets are supplied, never the full vocabularies.
    pub fn filter_mapping_user(groups: &[&str], categories: &[&str], prompt: &str) -> String {
        format!(
            "Valid groups: {}\nValid categories: {}\nUser query: \"{}\"\n\n\
             Select the most relevant groups and categories from the lists above. \
             Return a JSON object with the keys 'groups' and 'categories'.",
            serde_json::to_string(groups).unwrap_or_else(|_| "[]".to_string()),
            serde_json::to_string(categories).unwrap_or_else(|_| "[]".to_string()),
            prompt
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{ToolDefinition, ToolParameter};

    #[test]
    fn test_planning_prompt_lists_tools_and_history() {
        let tools = ToolSpec::new().register(
            ToolDefinition::new("get_people", "Look up directory records")
                .with_parameter(ToolParameter::new("name", "Name to search for", true)),
        );
        let mut conv = Conversation::new();
        conv.add_user("who is Ada Lovelace?");
        conv.add_tool_observation("1 record found");

        let prompt = PromptTemplate::planning(&conv, &tools);
        assert!(prompt.contains("get_people"));
        assert!(prompt.contains("name (string, required)"));
        assert!(prompt.contains("Look up directory records"));
        assert!(prompt.contains("User: who is Ada Lovelace?"));
        assert!(prompt.contains("Observation: 1 record found"));
    }

    #[test]
    fn test_system_prompt_embeds_current_date() {
        let prompt = PromptTemplate::system("2026-08-27");
        assert!(prompt.contains("Today's date is 2026-08-27"));
        assert!(prompt.contains("final_answer"));
    }

    #[test]
    fn test_planning_prompt_skips_system_messages() {
        let mut conv = Conversation::new();
        conv.push(crate::session::entities::Message::system("system text"));
        let prompt = PromptTemplate::planning(&conv, &ToolSpec::new());
        assert!(!prompt.contains("system text"));
    }

    #[test]
    fn test_filter_mapping_user_embeds_candidates() {
        let prompt = PromptTemplate::filter_mapping_user(
            &["+DataScience (+DS)"],
            &["All"],
            "data science events",
        );
        assert!(prompt.contains("+DataScience (+DS)"));
        assert!(prompt.contains("data science events"));
        assert!(prompt.contains("'groups' and 'categories'"));
    }
}
