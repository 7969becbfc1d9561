//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Every variant here is recoverable within a conversational turn: callers
/// degrade to a safe default (empty list, `All` sentinel, apology message)
/// rather than terminating the process.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Vocabulary list '{0}' could not be loaded: {1}")]
    VocabularyLoad(String, String),

    #[error("No candidate matched query: {0}")]
    NoCandidateMatch(String),

    #[error("Model mapping failed: {0}")]
    ModelMapping(String),

    #[error("Step budget of {0} exceeded")]
    StepBudgetExceeded(usize),

    #[error("Operation cancelled")]
    Cancelled,
}
