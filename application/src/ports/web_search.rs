//! Web search port
//!
//! Fallback path for questions no structured campus endpoint covers. The
//! adapter shapes raw engine output into a compact digest before it reaches
//! the planner.

use crate::ports::llm_gateway::GatewayError;
use async_trait::async_trait;

const DEFAULT_RESULT_COUNT: usize = 10;

/// A web search request, already rewritten by the planner into a focused
/// query string.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub query: String,
    pub result_count: usize,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            result_count: DEFAULT_RESULT_COUNT,
        }
    }

    pub fn with_result_count(mut self, count: usize) -> Self {
        self.result_count = count;
        self
    }
}

/// Port for an external search engine.
#[async_trait]
pub trait WebSearchPort: Send + Sync {
    /// Run the search and return a shaped text digest suitable for use as a
    /// planner observation.
    async fn search(&self, query: &SearchQuery) -> Result<String, GatewayError>;
}
