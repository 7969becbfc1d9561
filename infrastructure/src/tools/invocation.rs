//! Typed tool invocations.
//!
//! [`ToolInvocation`] is the closed set of dispatchable tools. Converting a
//! raw [`ToolCall`] into a variant is the single place planner-supplied
//! arguments are parsed and type-checked; past this point every handler
//! works with concrete types.

use quadbot_application::FeedType;
use quadbot_domain::{FilterMethod, ToolCall, ToolError};

#[derive(Debug, Clone)]
pub struct EventsArgs {
    pub prompt: String,
    pub feed_type: FeedType,
    /// `None` falls back to the configured default window
    pub future_days: Option<u32>,
    pub group_method: FilterMethod,
    pub category_method: FilterMethod,
}

#[derive(Debug, Clone)]
pub struct CurriculumArgs {
    pub subject: String,
}

#[derive(Debug, Clone)]
pub struct CourseDetailArgs {
    pub course_id: String,
    pub offer_number: String,
}

#[derive(Debug, Clone)]
pub struct PeopleArgs {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct FormatQueryArgs {
    pub query: String,
}

#[derive(Debug, Clone)]
pub struct WebSearchArgs {
    pub query: String,
}

/// A validated, typed tool invocation.
#[derive(Debug, Clone)]
pub enum ToolInvocation {
    GetCampusEvents(EventsArgs),
    GetCurriculumBySubject(CurriculumArgs),
    GetCourseDetails(CourseDetailArgs),
    GetPeople(PeopleArgs),
    SearchSubjectFormat(FormatQueryArgs),
    SearchGroupFormat(FormatQueryArgs),
    SearchCategoryFormat(FormatQueryArgs),
    WebSearch(WebSearchArgs),
}

impl ToolInvocation {
    /// Parse a call whose name has already been resolved to a canonical
    /// tool name.
    pub fn parse(canonical_name: &str, call: &ToolCall) -> Result<Self, ToolError> {
        match canonical_name {
            "get_campus_events" => Ok(Self::GetCampusEvents(parse_events_args(call)?)),
            "get_curriculum_by_subject" => Ok(Self::GetCurriculumBySubject(CurriculumArgs {
                subject: require(call, "subject")?,
            })),
            "get_course_details" => Ok(Self::GetCourseDetails(CourseDetailArgs {
                course_id: require(call, "course_id")?,
                offer_number: call.get_string("offer_number").unwrap_or("1").to_string(),
            })),
            "get_people" => Ok(Self::GetPeople(PeopleArgs {
                name: require(call, "name")?,
            })),
            "search_subject_format" => Ok(Self::SearchSubjectFormat(FormatQueryArgs {
                query: require(call, "query")?,
            })),
            "search_group_format" => Ok(Self::SearchGroupFormat(FormatQueryArgs {
                query: require(call, "query")?,
            })),
            "search_category_format" => Ok(Self::SearchCategoryFormat(FormatQueryArgs {
                query: require(call, "query")?,
            })),
            "web_search" => Ok(Self::WebSearch(WebSearchArgs {
                query: require(call, "query")?,
            })),
            other => Err(ToolError::unknown_tool(other)),
        }
    }
}

fn require(call: &ToolCall, key: &str) -> Result<String, ToolError> {
    call.require_string(key)
        .map(str::to_string)
        .map_err(ToolError::invalid_argument)
}

fn parse_events_args(call: &ToolCall) -> Result<EventsArgs, ToolError> {
    let prompt = require(call, "prompt")?;

    let feed_type = match call.get_string("feed_type") {
        Some(raw) => raw.parse::<FeedType>().map_err(ToolError::invalid_argument)?,
        None => FeedType::default(),
    };

    let future_days = match call.get_i64("future_days") {
        Some(days) if (1..=366).contains(&days) => Some(days as u32),
        Some(days) => {
            return Err(ToolError::invalid_argument(format!(
                "future_days must be between 1 and 366, got {days}"
            )));
        }
        None => None,
    };

    Ok(EventsArgs {
        prompt,
        feed_type,
        future_days,
        group_method: parse_method(call, "group_method")?,
        category_method: parse_method(call, "category_method")?,
    })
}

fn parse_method(call: &ToolCall, key: &str) -> Result<FilterMethod, ToolError> {
    match call.get_string(key) {
        None => Ok(FilterMethod::AnyMatch),
        Some("any_match") => Ok(FilterMethod::AnyMatch),
        Some("all_match") => Ok(FilterMethod::AllMatch),
        Some(other) => Err(ToolError::invalid_argument(format!(
            "{key} must be any_match or all_match, got '{other}'"
        ))),
    }
}
