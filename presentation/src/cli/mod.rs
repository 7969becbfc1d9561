//! CLI command definitions

mod commands;

pub use commands::Cli;
