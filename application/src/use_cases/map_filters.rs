//! Semantic filter mapper.
//!
//! Turns a free-form event prompt into a [`FilterSelection`] over the
//! controlled group and category vocabularies. The full vocabularies never
//! reach the model: each list is first reduced to a fuzzy-ranked shortlist,
//! and the model's answer is filtered back against that shortlist so only
//! canonical values survive.
//!
//! This use case is infallible. Any failure along the way (gateway error,
//! unparseable model output, hallucinated values) degrades to the `All`
//! sentinel on the affected side.

use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use quadbot_domain::{
    rank, CandidateSet, DomainError, FilterSelection, ListId, Message, PromptTemplate, Selection,
    VocabularyStore,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shape of the model's mapping answer.
#[derive(Debug, Deserialize, Default)]
struct MappingResponse {
    #[serde(default)]
    groups: Vec<String>,
    #[serde(default)]
    categories: Vec<String>,
}

pub struct MapFiltersUseCase {
    llm_gateway: Arc<dyn LlmGateway>,
    vocabulary: Arc<VocabularyStore>,
    fuzzy_top_n: usize,
}

impl MapFiltersUseCase {
    pub fn new(
        llm_gateway: Arc<dyn LlmGateway>,
        vocabulary: Arc<VocabularyStore>,
        fuzzy_top_n: usize,
    ) -> Self {
        Self {
            llm_gateway,
            vocabulary,
            fuzzy_top_n,
        }
    }

    /// Map a natural-language event prompt to canonical filter values.
    pub async fn execute(&self, prompt: &str) -> FilterSelection {
        let group_candidates = rank(
            prompt,
            self.vocabulary.get(ListId::Groups),
            self.fuzzy_top_n,
        );
        let category_candidates = rank(
            prompt,
            self.vocabulary.get(ListId::Categories),
            self.fuzzy_top_n,
        );

        // Nothing to choose from, so there is nothing to ask the model
        if group_candidates.is_empty() && category_candidates.is_empty() {
            let err = DomainError::NoCandidateMatch(prompt.to_string());
            warn!(error = %err, "defaulting to All");
            return FilterSelection::all();
        }

        let request = CompletionRequest::new(vec![
            Message::system(PromptTemplate::filter_mapping_system()),
            Message::user(PromptTemplate::filter_mapping_user(
                &entries_or_all(&group_candidates),
                &entries_or_all(&category_candidates),
                prompt,
            )),
        ]);

        let completion = match self.llm_gateway.complete(request).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "filter mapping request failed, defaulting to All");
                return FilterSelection::all();
            }
        };

        let response = match parse_mapping(&completion) {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "defaulting to All");
                return FilterSelection::all();
            }
        };

        let groups = retain_candidates(response.groups, &group_candidates);
        let categories = retain_candidates(response.categories, &category_candidates);
        debug!(?groups, ?categories, "mapped prompt to filters");

        FilterSelection::new(Selection::from_values(groups), Selection::from_values(categories))
    }
}

/// Parse the two-key mapping JSON, tolerating a fenced code block around it.
fn parse_mapping(text: &str) -> Result<MappingResponse, DomainError> {
    serde_json::from_str(strip_code_fence(text))
        .map_err(|e| DomainError::ModelMapping(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip an optional language tag on the opening fence
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// An empty shortlist on one side still has a legal answer: the `All`
/// sentinel. Offering it keeps the model step useful for the other side.
fn entries_or_all(candidates: &CandidateSet) -> Vec<&str> {
    if candidates.is_empty() {
        vec!["All"]
    } else {
        candidates.entries()
    }
}

/// Keep only values that were actually offered as candidates, preserving
/// the "All" sentinel which is always a legal answer.
fn retain_candidates(values: Vec<String>, candidates: &CandidateSet) -> Vec<String> {
    values
        .into_iter()
        .filter(|v| v.eq_ignore_ascii_case("all") || candidates.contains(v))
        .collect()
}
