//! Turn state machine, planner action parsing, and prompt templates.

pub mod action_parser;
pub mod entities;
pub mod prompt;
