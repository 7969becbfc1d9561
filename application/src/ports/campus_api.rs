//! Campus API port
//!
//! Thin request/response contracts for the university's public REST
//! endpoints: the calendar feed, the curriculum directory, and the people
//! directory. Only the contracts matter here; URL construction and HTTP
//! live in the infrastructure gateway.

use crate::ports::llm_gateway::GatewayError;
use async_trait::async_trait;
use quadbot_domain::{FilterMethod, FilterSelection};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Calendar feed output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    Rss,
    Js,
    Ics,
    Csv,
    #[default]
    Json,
    Jsonp,
}

impl FeedType {
    pub fn as_str(&self) -> &str {
        match self {
            FeedType::Rss => "rss",
            FeedType::Js => "js",
            FeedType::Ics => "ics",
            FeedType::Csv => "csv",
            FeedType::Json => "json",
            FeedType::Jsonp => "jsonp",
        }
    }

    /// Feed types that are NOT native calendar formats get the
    /// `feed_type=simple` query parameter appended.
    pub fn needs_simple_param(&self) -> bool {
        !matches!(self, FeedType::Rss | FeedType::Js | FeedType::Ics | FeedType::Csv)
    }
}

impl FromStr for FeedType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rss" => Ok(FeedType::Rss),
            "js" => Ok(FeedType::Js),
            "ics" => Ok(FeedType::Ics),
            "csv" => Ok(FeedType::Csv),
            "json" => Ok(FeedType::Json),
            "jsonp" => Ok(FeedType::Jsonp),
            other => Err(format!(
                "invalid feed type '{other}' (expected rss|js|ics|csv|json|jsonp)"
            )),
        }
    }
}

/// A fully resolved calendar query.
///
/// Built only from validated values: the filter selection comes out of the
/// semantic filter mapper, never straight from user text.
#[derive(Debug, Clone)]
pub struct EventsQuery {
    pub feed_type: FeedType,
    /// Forward window in days
    pub future_days: u32,
    pub filters: FilterSelection,
    pub group_method: FilterMethod,
    pub category_method: FilterMethod,
}

impl EventsQuery {
    pub fn new(filters: FilterSelection) -> Self {
        Self {
            feed_type: FeedType::default(),
            future_days: 45,
            filters,
            group_method: FilterMethod::AnyMatch,
            category_method: FilterMethod::AnyMatch,
        }
    }

    pub fn with_feed_type(mut self, feed_type: FeedType) -> Self {
        self.feed_type = feed_type;
        self
    }

    pub fn with_future_days(mut self, days: u32) -> Self {
        self.future_days = days;
        self
    }

    pub fn with_group_method(mut self, method: FilterMethod) -> Self {
        self.group_method = method;
        self
    }

    pub fn with_category_method(mut self, method: FilterMethod) -> Self {
        self.category_method = method;
        self
    }
}

/// Port for the campus REST endpoints.
///
/// Every method is a bounded, potentially blocking network call. Non-200
/// responses surface as [`GatewayError::HttpStatus`]; the tool executor
/// formats those into observation strings, they never crash a turn.
#[async_trait]
pub trait CampusApiPort: Send + Sync {
    /// Fetch raw calendar data in the requested feed format.
    async fn fetch_events(&self, query: &EventsQuery) -> Result<String, GatewayError>;

    /// Fetch the course list for a canonical subject. The adapter truncates
    /// to the first few records with an explicit note when more exist.
    async fn curriculum_by_subject(&self, subject: &str) -> Result<String, GatewayError>;

    /// Fetch detail for one course by identifier and offer number.
    async fn course_detail(
        &self,
        course_id: &str,
        offer_number: &str,
    ) -> Result<String, GatewayError>;

    /// Search the people directory by free-text name.
    async fn people_lookup(&self, name: &str) -> Result<String, GatewayError>;
}
