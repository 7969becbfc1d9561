//! Agent turn entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Phase of one conversational turn.
///
/// `Idle → Planning → ToolExecuting → Observing → Planning → ... →
/// Responding → Idle`, with `Aborted` reached when the step budget is
/// exhausted or the turn is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    /// Waiting for user input
    Idle,
    /// Asking the planner for the next action
    Planning,
    /// Executing a tool chosen by the planner
    ToolExecuting,
    /// Appending a tool result (or error string) to the conversation
    Observing,
    /// Producing the final answer
    Responding,
    /// Terminal: step budget exhausted or turn cancelled
    Aborted,
}

impl TurnPhase {
    pub fn as_str(&self) -> &str {
        match self {
            TurnPhase::Idle => "idle",
            TurnPhase::Planning => "planning",
            TurnPhase::ToolExecuting => "tool_executing",
            TurnPhase::Observing => "observing",
            TurnPhase::Responding => "responding",
            TurnPhase::Aborted => "aborted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnPhase::Idle | TurnPhase::Aborted)
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Step-budget accounting for one turn.
///
/// Each plan/observe cycle consumes one step, including cycles spent
/// recovering from unparseable planner output — that guarantee bounds the
/// turn even under adversarial model behavior.
#[derive(Debug, Clone)]
pub struct TurnState {
    phase: TurnPhase,
    steps_used: usize,
    max_steps: usize,
}

/// Default maximum plan/observe cycles per turn.
pub const DEFAULT_MAX_STEPS: usize = 5;

impl TurnState {
    pub fn new(max_steps: usize) -> Self {
        Self {
            phase: TurnPhase::Idle,
            steps_used: 0,
            max_steps,
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn steps_used(&self) -> usize {
        self.steps_used
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn set_phase(&mut self, phase: TurnPhase) {
        self.phase = phase;
    }

    /// Consume one plan/observe step. Fails with
    /// [`DomainError::StepBudgetExceeded`] when the budget is already
    /// exhausted, in which case the turn must abort.
    pub fn consume_step(&mut self) -> Result<(), DomainError> {
        if self.steps_used >= self.max_steps {
            return Err(DomainError::StepBudgetExceeded(self.max_steps));
        }
        self.steps_used += 1;
        Ok(())
    }

    pub fn abort(&mut self) {
        self.phase = TurnPhase::Aborted;
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STEPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_terminality() {
        assert!(TurnPhase::Idle.is_terminal());
        assert!(TurnPhase::Aborted.is_terminal());
        assert!(!TurnPhase::Planning.is_terminal());
        assert!(!TurnPhase::Observing.is_terminal());
    }

    #[test]
    fn test_step_budget_exhaustion() {
        let mut state = TurnState::new(3);
        assert!(state.consume_step().is_ok()); // 1
        assert!(state.consume_step().is_ok()); // 2
        assert!(state.consume_step().is_ok()); // 3
        assert!(matches!(
            state.consume_step(),
            Err(DomainError::StepBudgetExceeded(3))
        ));
        assert_eq!(state.steps_used(), 3);
    }

    #[test]
    fn test_abort_is_terminal() {
        let mut state = TurnState::default();
        state.set_phase(TurnPhase::Planning);
        state.abort();
        assert_eq!(state.phase(), TurnPhase::Aborted);
        assert!(state.phase().is_terminal());
    }

    #[test]
    fn test_default_budget() {
        assert_eq!(TurnState::default().max_steps(), DEFAULT_MAX_STEPS);
    }
}
