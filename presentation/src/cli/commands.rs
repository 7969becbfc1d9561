//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for quadbot
#[derive(Parser, Debug)]
#[command(name = "quadbot")]
#[command(author, version, about = "Campus assistant - events, courses, and people lookups")]
#[command(long_about = r#"
Quadbot answers questions about campus events, the course catalog, and the
people directory, backed by a planning language model and a set of lookup
tools. Questions outside those sources fall back to institution-scoped web
search.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./quadbot.toml      Project-level config
3. ~/.config/quadbot/config.toml   Global config

Secrets are read from the environment, never from config files:
  OPENAI_API_KEY       planner / filter-mapping model
  CAMPUS_API_TOKEN     curriculum and directory endpoints
  SERPAPI_API_KEY      web search

Example:
  quadbot "any data science events this week?"
  quadbot --chat
  quadbot -v "who teaches COMPSCI 201?"
"#)]
pub struct Cli {
    /// The question to ask (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Maximum planning steps per turn (overrides config)
    #[arg(long, value_name = "N")]
    pub max_steps: Option<usize>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,
}
