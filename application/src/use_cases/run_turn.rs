//! Agent orchestrator.
//!
//! Drives one conversational turn through the explicit state machine:
//! `Planning → ToolExecuting → Observing → Planning → ... → Responding`.
//! The turn is bounded by a step budget; every plan/observe cycle consumes
//! one step, including cycles spent recovering from unparseable planner
//! output, so even an adversarial planner cannot loop forever.
//!
//! Cancellation is cooperative: the token is checked at phase boundaries and
//! raced against in-flight gateway calls. A cancelled turn leaves the
//! session conversation untouched.

use crate::config::ExecutionParams;
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::shared::check_cancelled;
use quadbot_domain::{
    parse_planner_action, Conversation, Message, PlannerAction, PromptTemplate, TurnPhase,
    TurnState,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Observation injected when the planner's output cannot be parsed.
const PARSE_FAILURE_OBSERVATION: &str =
    "Your last response could not be parsed as a tool call or final answer. \
     Reply with exactly one JSON object: {\"tool\": ..., \"args\": {...}} or \
     {\"final_answer\": ...}.";

/// Answer returned when the step budget runs out before a final answer.
const BUDGET_EXHAUSTED_ANSWER: &str =
    "I wasn't able to finish answering that within my lookup budget. \
     Could you rephrase the question or narrow it down?";

#[derive(Error, Debug)]
pub enum RunTurnError {
    #[error("turn cancelled")]
    Cancelled,
    /// The planner completion itself failed; without a planner there is no
    /// way to continue the turn.
    #[error("planner request failed: {0}")]
    Planner(#[from] GatewayError),
}

#[derive(Debug, Clone)]
pub struct RunTurnInput {
    pub question: String,
}

impl RunTurnInput {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunTurnOutput {
    /// The assistant's answer for this turn
    pub answer: String,
    /// Plan/observe cycles consumed
    pub steps_used: usize,
    /// Terminal phase: `Idle` for a normal answer, `Aborted` when the step
    /// budget ran out
    pub phase: TurnPhase,
}

pub struct RunTurnUseCase {
    llm_gateway: Arc<dyn LlmGateway>,
    tool_executor: Arc<dyn ToolExecutorPort>,
    params: ExecutionParams,
}

impl RunTurnUseCase {
    pub fn new(
        llm_gateway: Arc<dyn LlmGateway>,
        tool_executor: Arc<dyn ToolExecutorPort>,
        params: ExecutionParams,
    ) -> Self {
        Self {
            llm_gateway,
            tool_executor,
            params,
        }
    }

    /// Run one turn against the session conversation.
    ///
    /// The conversation is only committed to when the turn completes; on
    /// cancellation it is left exactly as it was.
    pub async fn execute(
        &self,
        conversation: &mut Conversation,
        input: RunTurnInput,
        cancel_token: &CancellationToken,
    ) -> Result<RunTurnOutput, RunTurnError> {
        let mut working = conversation.clone();
        working.add_user(&input.question);

        let mut state = TurnState::new(self.params.max_steps);
        info!(question = %input.question, max_steps = state.max_steps(), "starting turn");

        loop {
            check_cancelled(cancel_token).map_err(|_| RunTurnError::Cancelled)?;
            state.set_phase(TurnPhase::Planning);

            let completion = self.plan(&working, cancel_token).await?;

            match parse_planner_action(&completion) {
                Ok(PlannerAction::FinalAnswer(answer)) => {
                    state.set_phase(TurnPhase::Responding);
                    working.add_assistant(&answer);
                    *conversation = working;
                    state.set_phase(TurnPhase::Idle);
                    info!(steps_used = state.steps_used(), "turn complete");
                    return Ok(RunTurnOutput {
                        answer,
                        steps_used: state.steps_used(),
                        phase: TurnPhase::Idle,
                    });
                }
                Ok(PlannerAction::ToolCall(call)) => {
                    if state.consume_step().is_err() {
                        break;
                    }
                    state.set_phase(TurnPhase::ToolExecuting);
                    debug!(tool = %call.tool_name, step = state.steps_used(), "executing tool");

                    let result = tokio::select! {
                        biased;
                        _ = cancel_token.cancelled() => {
                            return Err(RunTurnError::Cancelled);
                        }
                        result = self.tool_executor.execute(&call) => result,
                    };

                    state.set_phase(TurnPhase::Observing);
                    if !result.is_success() {
                        warn!(tool = %result.tool_name, "tool failed, continuing turn");
                    }
                    working.add_tool_observation(result.observation());
                }
                Err(parse_error) => {
                    // Recovery consumes a step too, so malformed output
                    // cannot extend the turn indefinitely
                    if state.consume_step().is_err() {
                        break;
                    }
                    warn!(error = %parse_error, "unparseable planner output");
                    state.set_phase(TurnPhase::Observing);
                    working.add_tool_observation(PARSE_FAILURE_OBSERVATION);
                }
            }
        }

        // Step budget exhausted
        state.abort();
        warn!(max_steps = state.max_steps(), "step budget exhausted, aborting turn");
        working.add_assistant(BUDGET_EXHAUSTED_ANSWER);
        *conversation = working;
        Ok(RunTurnOutput {
            answer: BUDGET_EXHAUSTED_ANSWER.to_string(),
            steps_used: state.steps_used(),
            phase: TurnPhase::Aborted,
        })
    }

    async fn plan(
        &self,
        conversation: &Conversation,
        cancel_token: &CancellationToken,
    ) -> Result<String, RunTurnError> {
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let request = CompletionRequest::new(vec![
            Message::system(PromptTemplate::system(&today)),
            Message::user(PromptTemplate::planning(
                conversation,
                self.tool_executor.tool_spec(),
            )),
        ]);

        let completion = tokio::select! {
            biased;
            _ = cancel_token.cancelled() => {
                return Err(RunTurnError::Cancelled);
            }
            result = self.llm_gateway.complete(request) => result?,
        };
        Ok(completion)
    }
}
