//! Tool contracts exposed to the planner.
//!
//! Each callable capability (event lookup, curriculum lookup, format
//! resolvers, web search) is declared once at startup as an immutable
//! [`entities::ToolDefinition`] and referenced by name during planning.

pub mod entities;
pub mod traits;
pub mod value_objects;
