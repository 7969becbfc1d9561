//! Tool executor — the concrete implementation of [`ToolExecutorPort`].
//!
//! Bridges the planner's raw tool calls to the campus gateways, the web
//! search gateway, the format resolvers, and the semantic filter mapper.
//! Every failure path folds into a failed [`ToolResult`]; nothing here can
//! abort a turn.

use super::invocation::{EventsArgs, ToolInvocation};
use async_trait::async_trait;
use quadbot_application::{
    CampusApiPort, EventsQuery, ExecutionParams, GatewayError, MapFiltersUseCase, SearchQuery,
    ToolExecutorPort, WebSearchPort,
};
use quadbot_domain::{
    resolve_plain, resolve_subject, DefaultToolValidator, ToolCall, ToolError, ToolResult,
    ToolSpec, ToolValidator, VocabularyStore,
};
use std::sync::Arc;
use tracing::debug;

pub struct CampusToolExecutor {
    spec: ToolSpec,
    validator: DefaultToolValidator,
    campus: Arc<dyn CampusApiPort>,
    web_search: Arc<dyn WebSearchPort>,
    filter_mapper: Arc<MapFiltersUseCase>,
    vocabulary: Arc<VocabularyStore>,
    params: ExecutionParams,
}

impl CampusToolExecutor {
    pub fn new(
        spec: ToolSpec,
        campus: Arc<dyn CampusApiPort>,
        web_search: Arc<dyn WebSearchPort>,
        filter_mapper: Arc<MapFiltersUseCase>,
        vocabulary: Arc<VocabularyStore>,
        params: ExecutionParams,
    ) -> Self {
        Self {
            spec,
            validator: DefaultToolValidator,
            campus,
            web_search,
            filter_mapper,
            vocabulary,
            params,
        }
    }

    async fn dispatch(&self, invocation: ToolInvocation) -> Result<String, ToolError> {
        match invocation {
            ToolInvocation::GetCampusEvents(args) => self.fetch_events(args).await,
            ToolInvocation::GetCurriculumBySubject(args) => self
                .campus
                .curriculum_by_subject(&args.subject)
                .await
                .map_err(|e| gateway_error("curriculum lookup", e)),
            ToolInvocation::GetCourseDetails(args) => self
                .campus
                .course_detail(&args.course_id, &args.offer_number)
                .await
                .map_err(|e| gateway_error("course detail lookup", e)),
            ToolInvocation::GetPeople(args) => self
                .campus
                .people_lookup(&args.name)
                .await
                .map_err(|e| gateway_error("people lookup", e)),
            ToolInvocation::SearchSubjectFormat(args) => {
                let limit = self.params.resolver_match_limit;
                Ok(format_matches(
                    &args.query,
                    resolve_subject(&args.query, self.vocabulary.subjects(), limit),
                ))
            }
            ToolInvocation::SearchGroupFormat(args) => {
                let limit = self.params.resolver_match_limit;
                Ok(format_matches(
                    &args.query,
                    resolve_plain(&args.query, self.vocabulary.groups(), limit),
                ))
            }
            ToolInvocation::SearchCategoryFormat(args) => {
                let limit = self.params.resolver_match_limit;
                Ok(format_matches(
                    &args.query,
                    resolve_plain(&args.query, self.vocabulary.categories(), limit),
                ))
            }
            ToolInvocation::WebSearch(args) => self
                .web_search
                .search(&SearchQuery::new(args.query))
                .await
                .map_err(|e| gateway_error("web search", e)),
        }
    }

    async fn fetch_events(&self, args: EventsArgs) -> Result<String, ToolError> {
        let filters = self.filter_mapper.execute(&args.prompt).await;
        debug!(prompt = %args.prompt, ?filters, "mapped event prompt");

        let query = EventsQuery::new(filters)
            .with_feed_type(args.feed_type)
            .with_future_days(args.future_days.unwrap_or(self.params.default_future_days))
            .with_group_method(args.group_method)
            .with_category_method(args.category_method);

        self.campus
            .fetch_events(&query)
            .await
            .map_err(|e| gateway_error("event lookup", e))
    }
}

#[async_trait]
impl ToolExecutorPort for CampusToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let Some(canonical) = self.spec.resolve(&call.tool_name) else {
            return ToolResult::failure(&call.tool_name, ToolError::unknown_tool(&call.tool_name));
        };
        let canonical = canonical.to_string();

        // resolve() guarantees the canonical definition exists
        let Some(definition) = self.spec.get(&canonical) else {
            return ToolResult::failure(&canonical, ToolError::unknown_tool(&canonical));
        };
        if let Err(message) = self.validator.validate(call, definition) {
            return ToolResult::failure(&canonical, ToolError::invalid_argument(message));
        }

        let invocation = match ToolInvocation::parse(&canonical, call) {
            Ok(invocation) => invocation,
            Err(error) => return ToolResult::failure(&canonical, error),
        };

        match self.dispatch(invocation).await {
            Ok(output) => ToolResult::success(&canonical, output),
            Err(error) => ToolResult::failure(&canonical, error),
        }
    }
}

/// The resolver tool output contract.
fn format_matches(query: &str, matches: Vec<String>) -> String {
    serde_json::json!({ "query": query, "matches": matches }).to_string()
}

fn gateway_error(operation: &str, error: GatewayError) -> ToolError {
    match error {
        GatewayError::Timeout => ToolError::timeout(operation),
        GatewayError::HttpStatus(code) => {
            ToolError::gateway_failed(format!("{operation} failed with status {code}"))
        }
        other => ToolError::gateway_failed(format!("{operation} failed: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::default_tool_spec;
    use quadbot_application::{CompletionRequest, LlmGateway};
    use quadbot_domain::ControlledList;
    use std::sync::Mutex;

    struct StubCampus {
        response: Result<String, GatewayError>,
        event_queries: Mutex<Vec<EventsQuery>>,
    }

    impl StubCampus {
        fn returning(response: Result<String, GatewayError>) -> Arc<Self> {
            Arc::new(Self {
                response,
                event_queries: Mutex::new(Vec::new()),
            })
        }

        fn clone_response(&self) -> Result<String, GatewayError> {
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(GatewayError::HttpStatus(code)) => Err(GatewayError::HttpStatus(*code)),
                Err(GatewayError::Timeout) => Err(GatewayError::Timeout),
                Err(other) => Err(GatewayError::RequestFailed(other.to_string())),
            }
        }
    }

    #[async_trait]
    impl CampusApiPort for StubCampus {
        async fn fetch_events(&self, query: &EventsQuery) -> Result<String, GatewayError> {
            self.event_queries.lock().unwrap().push(query.clone());
            self.clone_response()
        }

        async fn curriculum_by_subject(&self, _subject: &str) -> Result<String, GatewayError> {
            self.clone_response()
        }

        async fn course_detail(&self, _id: &str, _n: &str) -> Result<String, GatewayError> {
            self.clone_response()
        }

        async fn people_lookup(&self, _name: &str) -> Result<String, GatewayError> {
            self.clone_response()
        }
    }

    struct StubSearch;

    #[async_trait]
    impl WebSearchPort for StubSearch {
        async fn search(&self, query: &SearchQuery) -> Result<String, GatewayError> {
            Ok(format!("results for {}", query.query))
        }
    }

    /// Mapper LLM stub that always picks the data science group.
    struct MappingLlm;

    #[async_trait]
    impl LlmGateway for MappingLlm {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, GatewayError> {
            Ok(r#"{"groups": ["+DataScience (+DS)"], "categories": ["All"]}"#.to_string())
        }
    }

    fn vocabulary() -> Arc<VocabularyStore> {
        Arc::new(VocabularyStore::new(
            ControlledList::from_lines([
                "AIPI - AI for Product Innovation",
                "COMPSCI - Computer Science",
            ]),
            ControlledList::from_lines(["+DataScience (+DS)"]),
            ControlledList::from_lines(["Artificial Intelligence", "Lecture/Talk"]),
        ))
    }

    fn executor(campus: Arc<StubCampus>) -> CampusToolExecutor {
        let vocab = vocabulary();
        let mapper = Arc::new(MapFiltersUseCase::new(
            Arc::new(MappingLlm),
            vocab.clone(),
            10,
        ));
        CampusToolExecutor::new(
            default_tool_spec(),
            campus,
            Arc::new(StubSearch),
            mapper,
            vocab,
            ExecutionParams::default(),
        )
    }

    #[tokio::test]
    async fn test_unknown_tool_fails_without_dispatch() {
        let campus = StubCampus::returning(Ok("unused".to_string()));
        let result = executor(campus).execute(&ToolCall::new("frobnicate")).await;
        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "UNKNOWN_TOOL");
    }

    #[tokio::test]
    async fn test_alias_resolves_to_canonical_tool() {
        let campus = StubCampus::returning(Ok("event data".to_string()));
        let call = ToolCall::new("get_events").with_arg("prompt", "data science events");
        let result = executor(campus.clone()).execute(&call).await;

        assert!(result.is_success());
        assert_eq!(result.tool_name, "get_campus_events");
        // The mapper's filter selection reached the gateway
        let queries = campus.event_queries.lock().unwrap();
        assert_eq!(
            queries[0].filters.groups.values(),
            &["+DataScience (+DS)".to_string()]
        );
        assert!(queries[0].filters.categories.is_all());
    }

    #[tokio::test]
    async fn test_validator_rejects_undeclared_argument() {
        let campus = StubCampus::returning(Ok("unused".to_string()));
        let call = ToolCall::new("get_people")
            .with_arg("name", "Ada Lovelace")
            .with_arg("department", "math");
        let result = executor(campus).execute(&call).await;
        assert_eq!(result.error().unwrap().code, "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_gateway_status_code_in_observation() {
        let campus = StubCampus::returning(Err(GatewayError::HttpStatus(500)));
        let call = ToolCall::new("get_curriculum_by_subject")
            .with_arg("subject", "COMPSCI - Computer Science");
        let result = executor(campus).execute(&call).await;

        assert_eq!(result.error().unwrap().code, "GATEWAY_FAILED");
        assert!(result.observation().contains("500"));
    }

    #[tokio::test]
    async fn test_gateway_timeout_maps_to_timeout_code() {
        let campus = StubCampus::returning(Err(GatewayError::Timeout));
        let call = ToolCall::new("get_people").with_arg("name", "Ada");
        let result = executor(campus).execute(&call).await;
        assert_eq!(result.error().unwrap().code, "TIMEOUT");
    }

    #[tokio::test]
    async fn test_subject_resolver_returns_match_json() {
        let campus = StubCampus::returning(Ok("unused".to_string()));
        let call = ToolCall::new("search_subject_format").with_arg("query", "ai-pi");
        let result = executor(campus).execute(&call).await;

        assert!(result.is_success());
        let parsed: serde_json::Value = serde_json::from_str(result.output().unwrap()).unwrap();
        assert_eq!(parsed["query"], "ai-pi");
        assert_eq!(parsed["matches"][0], "AIPI - AI for Product Innovation");
    }

    #[tokio::test]
    async fn test_resolver_no_match_is_empty_success() {
        let campus = StubCampus::returning(Ok("unused".to_string()));
        let call = ToolCall::new("search_category_format").with_arg("query", "basketweaving");
        let result = executor(campus).execute(&call).await;

        assert!(result.is_success());
        let parsed: serde_json::Value = serde_json::from_str(result.output().unwrap()).unwrap();
        assert!(parsed["matches"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_web_search_dispatch() {
        let campus = StubCampus::returning(Ok("unused".to_string()));
        let call = ToolCall::new("web_search").with_arg("query", "engineering admissions");
        let result = executor(campus).execute(&call).await;
        assert_eq!(result.output(), Some("results for engineering admissions"));
    }
}
