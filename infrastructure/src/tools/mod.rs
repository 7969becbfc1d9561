//! Tool registry and executor.
//!
//! [`default_tool_spec`] declares every capability the planner can invoke;
//! [`ToolInvocation`] turns a raw planner call into typed arguments; and
//! [`CampusToolExecutor`] dispatches invocations to the gateways, the format
//! resolvers, and the semantic filter mapper.

mod executor;
mod invocation;

pub use executor::CampusToolExecutor;
pub use invocation::{
    CourseDetailArgs, CurriculumArgs, EventsArgs, FormatQueryArgs, PeopleArgs, ToolInvocation,
    WebSearchArgs,
};

use quadbot_domain::{ToolDefinition, ToolParameter, ToolSpec};

/// Build the standard tool registry.
///
/// Registration order is what the planner sees in its prompt. Aliases cover
/// shorthand names models commonly substitute for the canonical ones.
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(
            ToolDefinition::new(
                "get_campus_events",
                "Fetch upcoming campus events matching a natural-language prompt. \
                 Filters are derived from the prompt automatically.",
            )
            .with_parameter(ToolParameter::new(
                "prompt",
                "Natural-language description of the events wanted",
                true,
            ))
            .with_parameter(ToolParameter::new(
                "feed_type",
                "Output format: rss, js, ics, csv, json, or jsonp (default json)",
                false,
            ))
            .with_parameter(
                ToolParameter::new(
                    "future_days",
                    "How many days ahead to search (default 45)",
                    false,
                )
                .with_type("integer"),
            )
            .with_parameter(ToolParameter::new(
                "group_method",
                "any_match (OR, default) or all_match (AND) across group filters",
                false,
            ))
            .with_parameter(ToolParameter::new(
                "category_method",
                "any_match (OR, default) or all_match (AND) across category filters",
                false,
            )),
        )
        .register(
            ToolDefinition::new(
                "get_curriculum_by_subject",
                "List courses for a subject. The subject must be the canonical value \
                 returned by search_subject_format.",
            )
            .with_parameter(ToolParameter::new(
                "subject",
                "Canonical subject, exactly as returned by search_subject_format",
                true,
            )),
        )
        .register(
            ToolDefinition::new(
                "get_course_details",
                "Fetch detailed information about one course.",
            )
            .with_parameter(ToolParameter::new(
                "course_id",
                "Course identifier from a curriculum listing",
                true,
            ))
            .with_parameter(ToolParameter::new(
                "offer_number",
                "Course offer number (default 1)",
                false,
            )),
        )
        .register(
            ToolDefinition::new(
                "get_people",
                "Search the people directory by name.",
            )
            .with_parameter(ToolParameter::new("name", "Name to search for", true)),
        )
        .register(
            ToolDefinition::new(
                "search_subject_format",
                "Find the canonical subject value for a code or description fragment. \
                 Call this before get_curriculum_by_subject.",
            )
            .with_parameter(ToolParameter::new(
                "query",
                "Subject code or description fragment, e.g. 'aipi' or 'computer science'",
                true,
            )),
        )
        .register(
            ToolDefinition::new(
                "search_group_format",
                "Find canonical event group values matching a fragment.",
            )
            .with_parameter(ToolParameter::new("query", "Group name fragment", true)),
        )
        .register(
            ToolDefinition::new(
                "search_category_format",
                "Find canonical event category values matching a fragment.",
            )
            .with_parameter(ToolParameter::new("query", "Category name fragment", true)),
        )
        .register(
            ToolDefinition::new(
                "web_search",
                "General web search scoped to the institution. Use when no structured \
                 lookup tool covers the question.",
            )
            .with_parameter(ToolParameter::new("query", "Search query", true)),
        )
        .register_alias("get_events", "get_campus_events")
        .register_alias("get_curriculum", "get_curriculum_by_subject")
        .register_alias("get_course_detail", "get_course_details")
        .register_alias("people_search", "get_people")
        .register_alias("search", "web_search")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spec_covers_all_tools() {
        let spec = default_tool_spec();
        let names: Vec<&str> = spec.names().collect();
        assert_eq!(
            names,
            vec![
                "get_campus_events",
                "get_curriculum_by_subject",
                "get_course_details",
                "get_people",
                "search_subject_format",
                "search_group_format",
                "search_category_format",
                "web_search",
            ]
        );
    }

    #[test]
    fn test_aliases_resolve() {
        let spec = default_tool_spec();
        assert_eq!(spec.resolve("get_events"), Some("get_campus_events"));
        assert_eq!(spec.resolve("search"), Some("web_search"));
        assert_eq!(spec.resolve("frobnicate"), None);
    }
}
