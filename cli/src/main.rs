//! CLI entrypoint for quadbot
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{bail, Context, Result};
use clap::Parser;
use quadbot_application::{MapFiltersUseCase, RunTurnInput, RunTurnUseCase};
use quadbot_infrastructure::{
    default_tool_spec, load_vocabulary, CampusHttpGateway, CampusToolExecutor, ConfigLoader,
    OpenAiChatGateway, SerpSearchGateway,
};
use quadbot_presentation::{ChatRepl, Cli};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting quadbot");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };

    let mut params = config.agent.execution_params();
    if let Some(max_steps) = cli.max_steps {
        params.max_steps = max_steps;
    }

    // === Dependency Injection ===
    let vocabulary = Arc::new(load_vocabulary(&config.vocab));

    let llm_gateway = Arc::new(
        OpenAiChatGateway::new(
            &config.llm.base_url,
            &config.llm.model,
            &config.llm.api_key_env,
            config.llm.timeout_secs,
        )
        .context("failed to initialize the language model gateway")?,
    );

    let campus_gateway = Arc::new(
        CampusHttpGateway::new(&config.campus, &params)
            .context("failed to initialize the campus gateway")?,
    );
    let search_gateway = Arc::new(
        SerpSearchGateway::new(&config.campus)
            .context("failed to initialize the search gateway")?,
    );

    let filter_mapper = Arc::new(MapFiltersUseCase::new(
        llm_gateway.clone(),
        vocabulary.clone(),
        params.fuzzy_top_n,
    ));

    let executor = Arc::new(CampusToolExecutor::new(
        default_tool_spec(),
        campus_gateway,
        search_gateway,
        filter_mapper,
        vocabulary,
        params.clone(),
    ));

    let use_case = RunTurnUseCase::new(llm_gateway, executor, params);

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(use_case);
        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    let mut conversation = quadbot_domain::Conversation::new();
    let token = CancellationToken::new();

    let output = tokio::select! {
        result = use_case.execute(&mut conversation, RunTurnInput::new(&question), &token) => {
            result.context("turn failed")?
        }
        _ = tokio::signal::ctrl_c() => {
            token.cancel();
            bail!("cancelled");
        }
    };

    println!("{}", output.answer);
    Ok(())
}
