//! Presentation layer for quadbot
//!
//! The clap command-line surface and the rustyline chat REPL that drives
//! the turn orchestrator.

pub mod chat;
pub mod cli;

pub use chat::ChatRepl;
pub use cli::Cli;
