//! Domain layer for quadbot
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Controlled Vocabularies
//!
//! Campus APIs only accept filter values from closed lists (subjects,
//! organizer groups, event categories). The [`vocab`] module owns those
//! lists and the matching logic that turns free-form user text into
//! canonical entries: a fuzzy candidate filter and a format resolver.
//!
//! ## Tool Contracts
//!
//! Every capability the planner can invoke is declared as a
//! [`ToolDefinition`] with typed parameters. Argument presence is validated
//! here; controlled-list membership is resolved upstream by the format
//! resolvers and the semantic filter mapper, never re-checked at dispatch.
//!
//! ## Turn State Machine
//!
//! One conversational turn walks
//! `Idle → Planning → ToolExecuting → Observing → Responding → Idle`,
//! bounded by a step budget, with a terminal `Aborted` state.

pub mod agent;
pub mod core;
pub mod filter;
pub mod session;
pub mod tool;
pub mod vocab;

// Re-export commonly used types
pub use agent::{
    action_parser::{ActionParseError, PlannerAction, parse_planner_action},
    entities::{DEFAULT_MAX_STEPS, TurnPhase, TurnState},
    prompt::PromptTemplate,
};
pub use core::{
    error::DomainError,
    string::{normalize_key, truncate},
};
pub use filter::{FilterMethod, FilterSelection, Selection};
pub use session::entities::{Conversation, Message, Role};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};
pub use vocab::{
    entities::{ControlledList, ListId, VocabularyStore},
    matching::{CandidateSet, rank, token_set_ratio},
    resolver::{resolve_plain, resolve_subject},
};
