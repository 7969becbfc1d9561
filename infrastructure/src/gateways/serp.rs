//! SerpAPI-backed web search gateway.
//!
//! Fallback for questions the structured campus endpoints cannot answer.
//! Raw engine output is shaped into a compact digest: organic results with
//! institutional domains first, the knowledge graph block, and a handful of
//! related questions.

use crate::config::FileCampusConfig;
use async_trait::async_trait;
use quadbot_application::{GatewayError, SearchQuery, WebSearchPort};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

const SERPAPI_URL: &str = "https://serpapi.com/search.json";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Organic results kept after filtering.
const ORGANIC_RESULT_LIMIT: usize = 8;
/// Related questions kept.
const RELATED_QUESTION_LIMIT: usize = 4;
/// Unfiltered results kept when domain filtering leaves nothing.
const FALLBACK_RESULT_LIMIT: usize = 5;

pub struct SerpSearchGateway {
    http: reqwest::Client,
    api_key: Option<String>,
    institution: String,
    priority_domain: String,
    school_subdomain: String,
}

impl SerpSearchGateway {
    pub fn new(config: &FileCampusConfig) -> Result<Self, GatewayError> {
        let api_key = match std::env::var(&config.serpapi_key_env) {
            Ok(key) if !key.is_empty() => Some(key),
            _ => {
                warn!(
                    env = %config.serpapi_key_env,
                    "SerpAPI key not set, web search will report an error when used"
                );
                None
            }
        };

        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        Ok(Self {
            http,
            api_key,
            institution: config.institution.clone(),
            priority_domain: config.priority_domain.clone(),
            school_subdomain: config.school_subdomain.clone(),
        })
    }

    /// Make sure the institution name appears in the query so generic terms
    /// like "admissions deadlines" search the right school.
    fn scope_query(&self, query: &str) -> String {
        if self.institution.is_empty()
            || query.to_lowercase().contains(&self.institution.to_lowercase())
        {
            query.to_string()
        } else {
            format!("{} {}", self.institution, query)
        }
    }
}

#[async_trait]
impl WebSearchPort for SerpSearchGateway {
    async fn search(&self, query: &SearchQuery) -> Result<String, GatewayError> {
        let Some(api_key) = &self.api_key else {
            return Err(GatewayError::RequestFailed(
                "search engine API key is not configured".to_string(),
            ));
        };

        let scoped = self.scope_query(&query.query);
        let count = query.result_count.to_string();
        debug!(query = %scoped, results = %count, "running web search");
        let response = self
            .http
            .get(SERPAPI_URL)
            .query(&[
                ("q", scoped.as_str()),
                ("engine", "google"),
                ("num", count.as_str()),
                ("api_key", api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::HttpStatus(status.as_u16()));
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
        let shaped = shape_results(&raw, &self.priority_domain, &self.school_subdomain);
        serde_json::to_string(&shaped).map_err(|e| GatewayError::MalformedResponse(e.to_string()))
    }
}

/// Shape raw SerpAPI output into the digest fed back to the planner.
///
/// Organic results are filtered to those mentioning the institutional
/// domain's stem in their link or snippet, with an extra priority tier for
/// the school subdomain; when filtering leaves nothing, the unfiltered top
/// results are used instead.
pub fn shape_results(raw: &Value, priority_domain: &str, school_subdomain: &str) -> Value {
    let mut shaped = json!({
        "search_metadata": {},
        "organic_results": [],
        "knowledge_graph": {},
        "related_questions": [],
    });

    if let Some(metadata) = raw.get("search_metadata") {
        shaped["search_metadata"] = json!({
            "query": metadata.get("query").cloned().unwrap_or(json!("")),
            "total_results": raw
                .pointer("/search_information/total_results")
                .cloned()
                .unwrap_or(json!(0)),
        });
    }

    if let Some(organic) = raw.get("organic_results").and_then(Value::as_array) {
        let selected = prioritize_organic(organic, priority_domain, school_subdomain);
        shaped["organic_results"] = selected
            .into_iter()
            .take(ORGANIC_RESULT_LIMIT)
            .map(|result| {
                json!({
                    "title": field(result, "title"),
                    "link": field(result, "link"),
                    "snippet": field(result, "snippet"),
                    "source": field(result, "source"),
                })
            })
            .collect();
    }

    if let Some(kg) = raw.get("knowledge_graph") {
        shaped["knowledge_graph"] = json!({
            "title": field(kg, "title"),
            "type": field(kg, "type"),
            "description": field(kg, "description"),
            "website": field(kg, "website"),
            "address": field(kg, "address"),
        });
    }

    if let Some(questions) = raw.get("related_questions").and_then(Value::as_array) {
        shaped["related_questions"] = questions
            .iter()
            .take(RELATED_QUESTION_LIMIT)
            .map(|q| {
                json!({
                    "question": field(q, "question"),
                    "answer": field(q, "answer"),
                })
            })
            .collect();
    }

    shaped
}

fn prioritize_organic<'a>(
    organic: &'a [Value],
    priority_domain: &str,
    school_subdomain: &str,
) -> Vec<&'a Value> {
    // "example.edu" matches on its stem so snippets mentioning the school
    // by name count too
    let stem = priority_domain.split('.').next().unwrap_or(priority_domain).to_lowercase();
    if stem.is_empty() {
        return organic.iter().collect();
    }

    let matches_domain = |result: &Value| {
        let link = field(result, "link").to_lowercase();
        let snippet = field(result, "snippet").to_lowercase();
        link.contains(&stem) || snippet.contains(&stem)
    };

    let filtered: Vec<&Value> = organic.iter().filter(|r| matches_domain(r)).collect();
    if filtered.is_empty() {
        return organic.iter().take(FALLBACK_RESULT_LIMIT).collect();
    }

    if school_subdomain.is_empty() {
        return filtered;
    }
    let (school, rest): (Vec<&Value>, Vec<&Value>) = filtered
        .into_iter()
        .partition(|r| field(r, "link").contains(school_subdomain));
    school.into_iter().chain(rest).collect()
}

fn field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_results() -> Value {
        json!({
            "search_metadata": {"query": "Example University robotics"},
            "search_information": {"total_results": 12345},
            "organic_results": [
                {"title": "Robotics news", "link": "https://news.com/robots", "snippet": "general robotics"},
                {"title": "Example research", "link": "https://example.edu/research", "snippet": "labs"},
                {"title": "Engineering school", "link": "https://eng.example.edu/", "snippet": "engineering at Example"},
            ],
            "knowledge_graph": {"title": "Example University", "type": "University", "website": "https://example.edu"},
            "related_questions": [
                {"question": "Is Example good at robotics?", "answer": "Yes."},
            ],
        })
    }

    #[test]
    fn test_institutional_results_come_first() {
        let shaped = shape_results(&raw_results(), "example.edu", "eng.example.edu");
        let organic = shaped["organic_results"].as_array().unwrap();

        // Subdomain tier first, then other institutional results; the
        // unrelated result is filtered out entirely
        assert_eq!(organic.len(), 2);
        assert_eq!(organic[0]["link"], "https://eng.example.edu/");
        assert_eq!(organic[1]["link"], "https://example.edu/research");
    }

    #[test]
    fn test_fallback_when_nothing_institutional() {
        let raw = json!({
            "organic_results": [
                {"title": "A", "link": "https://a.com", "snippet": "x"},
                {"title": "B", "link": "https://b.com", "snippet": "y"},
            ]
        });
        let shaped = shape_results(&raw, "example.edu", "");
        assert_eq!(shaped["organic_results"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_knowledge_graph_and_questions_extracted() {
        let shaped = shape_results(&raw_results(), "example.edu", "");
        assert_eq!(shaped["knowledge_graph"]["title"], "Example University");
        assert_eq!(
            shaped["related_questions"][0]["question"],
            "Is Example good at robotics?"
        );
        assert_eq!(shaped["search_metadata"]["total_results"], 12345);
    }

    #[test]
    fn test_missing_sections_leave_empty_defaults() {
        let shaped = shape_results(&json!({}), "example.edu", "");
        assert!(shaped["organic_results"].as_array().unwrap().is_empty());
        assert!(shaped["related_questions"].as_array().unwrap().is_empty());
    }
}
