//! Campus REST gateway.
//!
//! Implements [`CampusApiPort`] against the institution's public calendar,
//! curriculum, and people-directory endpoints. Filter values arriving here
//! are already canonical; this adapter only builds URLs, makes bounded HTTP
//! calls, and shapes the raw payloads.

use crate::config::FileCampusConfig;
use async_trait::async_trait;
use quadbot_application::{CampusApiPort, EventsQuery, ExecutionParams, GatewayError};
use quadbot_domain::{truncate, FilterMethod, Selection};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// TCP connection timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the query parameters for a calendar feed request.
///
/// The `All` sentinel emits no filter parameter at all. OR filtering uses
/// the repeated `gfu[]` / `cfu[]` keys, AND filtering `gf[]` / `cf[]`.
/// Non-native feed types additionally request the simplified feed.
pub fn feed_query_params(query: &EventsQuery) -> Vec<(String, String)> {
    let mut params = Vec::new();

    push_filter_params(&mut params, &query.filters.categories, query.category_method, "cfu[]", "cf[]");
    push_filter_params(&mut params, &query.filters.groups, query.group_method, "gfu[]", "gf[]");

    params.push(("future_days".to_string(), query.future_days.to_string()));
    if query.feed_type.needs_simple_param() {
        params.push(("feed_type".to_string(), "simple".to_string()));
    }
    params
}

fn push_filter_params(
    params: &mut Vec<(String, String)>,
    selection: &Selection,
    method: FilterMethod,
    any_key: &str,
    all_key: &str,
) {
    let key = match method {
        FilterMethod::AnyMatch => any_key,
        FilterMethod::AllMatch => all_key,
    };
    for value in selection.values() {
        params.push((key.to_string(), value.clone()));
    }
}

pub struct CampusHttpGateway {
    http: reqwest::Client,
    calendar_url: String,
    curriculum_url: String,
    directory_url: String,
    api_token: Option<String>,
    curriculum_record_limit: usize,
    event_feed_max_bytes: usize,
}

impl CampusHttpGateway {
    pub fn new(
        config: &FileCampusConfig,
        params: &ExecutionParams,
    ) -> Result<Self, GatewayError> {
        let api_token = match std::env::var(&config.api_token_env) {
            Ok(token) if !token.is_empty() => Some(token),
            _ => {
                warn!(
                    env = %config.api_token_env,
                    "campus API token not set, curriculum and directory lookups may be rejected"
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
            calendar_url: config.calendar_url.trim_end_matches('/').to_string(),
            curriculum_url: config.curriculum_url.trim_end_matches('/').to_string(),
            directory_url: config.directory_url.trim_end_matches('/').to_string(),
            api_token,
            curriculum_record_limit: params.curriculum_record_limit,
            event_feed_max_bytes: params.event_feed_max_bytes,
        })
    }

    /// Append the access token for endpoints that require it. The calendar
    /// feed is public and never sees the token.
    fn authenticated_params(&self, query: &[(String, String)]) -> Vec<(String, String)> {
        let mut params = query.to_vec();
        if let Some(token) = &self.api_token {
            params.push(("access_token".to_string(), token.clone()));
        }
        params
    }

    async fn get_text(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<String, GatewayError> {
        let request = self.http.get(url).query(query);

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else if e.is_connect() {
                GatewayError::ConnectionError(e.to_string())
            } else {
                GatewayError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::HttpStatus(status.as_u16()));
        }
        response
            .text()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))
    }

    /// Cap a course list at the configured record limit, noting how many
    /// records exist so the planner can suggest a narrower query.
    fn shape_curriculum(&self, body: &str) -> Result<String, GatewayError> {
        let data: Value = serde_json::from_str(body)
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        let Value::Array(courses) = data else {
            // Non-list payloads pass through unshaped
            return Ok(truncate(body, self.event_feed_max_bytes));
        };
        if courses.len() <= self.curriculum_record_limit {
            return Ok(truncate(body, self.event_feed_max_bytes));
        }

        let total = courses.len();
        let limited: Vec<Value> = courses.into_iter().take(self.curriculum_record_limit).collect();
        let shaped = serde_json::json!({
            "courses": limited,
            "note": format!(
                "Showing {} out of {} courses. Use more specific queries to refine results.",
                self.curriculum_record_limit, total
            ),
        });
        serde_json::to_string(&shaped).map_err(|e| GatewayError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl CampusApiPort for CampusHttpGateway {
    async fn fetch_events(&self, query: &EventsQuery) -> Result<String, GatewayError> {
        let url = format!("{}.{}", self.calendar_url, query.feed_type.as_str());
        let params = feed_query_params(query);
        debug!(url = %url, params = params.len(), "fetching calendar events");

        let body = self.get_text(&url, &params).await?;
        Ok(truncate(&body, self.event_feed_max_bytes))
    }

    async fn curriculum_by_subject(&self, subject: &str) -> Result<String, GatewayError> {
        let encoded = urlencode_path_segment(subject);
        let url = format!("{}/subject/{}", self.curriculum_url, encoded);
        let body = self.get_text(&url, &self.authenticated_params(&[])).await?;
        self.shape_curriculum(&body)
    }

    async fn course_detail(
        &self,
        course_id: &str,
        offer_number: &str,
    ) -> Result<String, GatewayError> {
        let url = format!(
            "{}/crse_id/{}/crse_offer_nbr/{}",
            self.curriculum_url,
            urlencode_path_segment(course_id),
            urlencode_path_segment(offer_number)
        );
        self.get_text(&url, &self.authenticated_params(&[])).await
    }

    async fn people_lookup(&self, name: &str) -> Result<String, GatewayError> {
        let params = vec![("q".to_string(), name.to_string())];
        self.get_text(&self.directory_url, &self.authenticated_params(&params))
            .await
    }
}

/// Minimal percent-encoding for values placed in a URL path segment; query
/// parameters go through `reqwest`'s own encoding instead.
fn urlencode_path_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadbot_application::FeedType;
    use quadbot_domain::FilterSelection;

    fn param_values<'a>(params: &'a [(String, String)], key: &str) -> Vec<&'a str> {
        params
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn test_all_filters_emit_no_filter_params() {
        let query = EventsQuery::new(FilterSelection::all());
        let params = feed_query_params(&query);

        assert!(param_values(&params, "gfu[]").is_empty());
        assert!(param_values(&params, "gf[]").is_empty());
        assert!(param_values(&params, "cfu[]").is_empty());
        assert!(param_values(&params, "cf[]").is_empty());
        assert_eq!(param_values(&params, "future_days"), vec!["45"]);
    }

    #[test]
    fn test_or_filters_use_union_keys() {
        let filters = FilterSelection::new(
            Selection::from_values(vec!["+DataScience (+DS)".to_string()]),
            Selection::from_values(vec![
                "Artificial Intelligence".to_string(),
                "Lecture/Talk".to_string(),
            ]),
        );
        let params = feed_query_params(&EventsQuery::new(filters));

        assert_eq!(param_values(&params, "gfu[]"), vec!["+DataScience (+DS)"]);
        assert_eq!(
            param_values(&params, "cfu[]"),
            vec!["Artificial Intelligence", "Lecture/Talk"]
        );
        assert!(param_values(&params, "gf[]").is_empty());
    }

    #[test]
    fn test_and_filters_use_intersection_keys() {
        let filters = FilterSelection::new(
            Selection::from_values(vec!["Alumni Network".to_string()]),
            Selection::All,
        );
        let query = EventsQuery::new(filters).with_group_method(FilterMethod::AllMatch);
        let params = feed_query_params(&query);

        assert_eq!(param_values(&params, "gf[]"), vec!["Alumni Network"]);
        assert!(param_values(&params, "gfu[]").is_empty());
    }

    #[test]
    fn test_simple_param_only_for_non_native_feeds() {
        let json = EventsQuery::new(FilterSelection::all());
        assert_eq!(
            param_values(&feed_query_params(&json), "feed_type"),
            vec!["simple"]
        );

        let ics = EventsQuery::new(FilterSelection::all()).with_feed_type(FeedType::Ics);
        assert!(param_values(&feed_query_params(&ics), "feed_type").is_empty());
    }

    #[test]
    fn test_urlencode_path_segment() {
        assert_eq!(urlencode_path_segment("AIPI"), "AIPI");
        assert_eq!(urlencode_path_segment("A&B/C"), "A%26B%2FC");
        assert_eq!(urlencode_path_segment("John Doe"), "John%20Doe");
    }

    #[test]
    fn test_curriculum_shaping_truncates_with_note() {
        let gateway = test_gateway();
        let body: String = serde_json::to_string(
            &(0..8)
                .map(|i| serde_json::json!({"crse_id": i.to_string()}))
                .collect::<Vec<_>>(),
        )
        .unwrap();

        let shaped = gateway.shape_curriculum(&body).unwrap();
        let parsed: Value = serde_json::from_str(&shaped).unwrap();
        assert_eq!(parsed["courses"].as_array().unwrap().len(), 5);
        assert!(parsed["note"].as_str().unwrap().contains("5 out of 8"));
    }

    #[test]
    fn test_curriculum_shaping_passes_small_lists_through() {
        let gateway = test_gateway();
        let body = r#"[{"crse_id": "029248"}]"#;
        assert_eq!(gateway.shape_curriculum(body).unwrap(), body);
    }

    #[test]
    fn test_curriculum_shaping_rejects_garbage() {
        let gateway = test_gateway();
        assert!(matches!(
            gateway.shape_curriculum("<html>error</html>"),
            Err(GatewayError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_token_only_on_authenticated_endpoints() {
        let mut gateway = test_gateway();
        gateway.api_token = Some("sekrit".to_string());

        let authed = gateway.authenticated_params(&[("q".to_string(), "Ada".to_string())]);
        assert_eq!(param_values(&authed, "access_token"), vec!["sekrit"]);
        assert_eq!(param_values(&authed, "q"), vec!["Ada"]);

        // Calendar feed params are built without the gateway and carry no
        // credentials
        let feed = feed_query_params(&EventsQuery::new(FilterSelection::all()));
        assert!(param_values(&feed, "access_token").is_empty());
    }

    #[test]
    fn test_missing_token_adds_nothing() {
        let gateway = test_gateway();
        let params = gateway.authenticated_params(&[]);
        assert!(params.is_empty());
    }

    fn test_gateway() -> CampusHttpGateway {
        CampusHttpGateway {
            http: reqwest::Client::new(),
            calendar_url: "https://calendar.example.edu/events/index".to_string(),
            curriculum_url: "https://api.example.edu/curriculum/courses".to_string(),
            directory_url: "https://api.example.edu/ldap/people".to_string(),
            api_token: None,
            curriculum_record_limit: 5,
            event_feed_max_bytes: 16 * 1024,
        }
    }
}
