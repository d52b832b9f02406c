//! Controller lifecycle state machine.
//!
//! ```text
//! idle ──start──▶ running ──pause──▶ paused
//!                  │  ▲                 │
//!                  │  └─────resume──────┘
//!                  ├──complete──▶ completed ──start──▶ running
//!                  └──converge──▶ converged ──start──▶ running
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ControllerError;

/// Lifecycle state of an incremental simulation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    /// No session started yet.
    #[default]
    Idle,
    /// Batches are being scheduled.
    Running,
    /// Suspended between batches; results are retained.
    Paused,
    /// The requested number of runs was produced.
    Completed,
    /// Stopped early because the running mean stabilised.
    Converged,
}

impl ControllerState {
    /// Whether the session has finished (completed or converged).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Converged)
    }
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Converged => "converged",
        };
        f.write_str(s)
    }
}

/// Action that drives a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerAction {
    /// Begin a fresh session.
    Start,
    /// Stop scheduling batches.
    Pause,
    /// Continue a paused session on the same stream.
    Resume,
    /// Requested count reached.
    Complete,
    /// Running mean stabilised.
    Converge,
}

impl fmt::Display for ControllerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Complete => "complete",
            Self::Converge => "converge",
        };
        f.write_str(s)
    }
}

/// Transition table for [`ControllerState`].
pub struct ControllerStateMachine;

impl ControllerStateMachine {
    /// Target state of `action` taken from `from`, if allowed.
    #[must_use]
    pub const fn next_state(from: ControllerState, action: ControllerAction) -> Option<ControllerState> {
        use ControllerAction as A;
        use ControllerState as S;

        match (from, action) {
            (S::Idle | S::Completed | S::Converged, A::Start) => Some(S::Running),
            (S::Running, A::Pause) => Some(S::Paused),
            (S::Paused, A::Resume) => Some(S::Running),
            (S::Running, A::Complete) => Some(S::Completed),
            (S::Running, A::Converge) => Some(S::Converged),
            _ => None,
        }
    }

    /// Apply `action` to `from`.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::InvalidTransition`] if the table has no entry.
    pub const fn transition(
        from: ControllerState,
        action: ControllerAction,
    ) -> Result<ControllerState, ControllerError> {
        match Self::next_state(from, action) {
            Some(to) => Ok(to),
            None => Err(ControllerError::InvalidTransition { from, action }),
        }
    }

    /// Check if a state transition is valid.
    #[must_use]
    pub fn is_valid_transition(from: ControllerState, to: ControllerState) -> bool {
        Self::valid_next_states(from).contains(&to)
    }

    /// Get all valid next states from a given state.
    #[must_use]
    pub fn valid_next_states(from: ControllerState) -> Vec<ControllerState> {
        match from {
            ControllerState::Idle | ControllerState::Completed | ControllerState::Converged => {
                vec![ControllerState::Running]
            }
            ControllerState::Running => vec![
                ControllerState::Paused,
                ControllerState::Completed,
                ControllerState::Converged,
            ],
            ControllerState::Paused => vec![ControllerState::Running],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [ControllerState; 5] = [
        ControllerState::Idle,
        ControllerState::Running,
        ControllerState::Paused,
        ControllerState::Completed,
        ControllerState::Converged,
    ];

    const ALL_ACTIONS: [ControllerAction; 5] = [
        ControllerAction::Start,
        ControllerAction::Pause,
        ControllerAction::Resume,
        ControllerAction::Complete,
        ControllerAction::Converge,
    ];

    #[test]
    fn start_allowed_from_idle_and_terminal_states() {
        for from in [
            ControllerState::Idle,
            ControllerState::Completed,
            ControllerState::Converged,
        ] {
            assert_eq!(
                ControllerStateMachine::transition(from, ControllerAction::Start),
                Ok(ControllerState::Running)
            );
        }
    }

    #[test]
    fn pause_while_idle_is_rejected() {
        let err = ControllerStateMachine::transition(ControllerState::Idle, ControllerAction::Pause)
            .unwrap_err();
        assert_eq!(
            err,
            ControllerError::InvalidTransition {
                from: ControllerState::Idle,
                action: ControllerAction::Pause,
            }
        );
        assert_eq!(err.to_string(), "Cannot pause while idle");
    }

    #[test]
    fn start_while_running_is_rejected() {
        assert!(
            ControllerStateMachine::transition(ControllerState::Running, ControllerAction::Start)
                .is_err()
        );
    }

    #[test]
    fn action_table_agrees_with_next_state_table() {
        for from in ALL_STATES {
            for action in ALL_ACTIONS {
                if let Some(to) = ControllerStateMachine::next_state(from, action) {
                    assert!(ControllerStateMachine::is_valid_transition(from, to));
                }
            }
            for to in ControllerStateMachine::valid_next_states(from) {
                assert!(
                    ALL_ACTIONS
                        .iter()
                        .any(|a| ControllerStateMachine::next_state(from, *a) == Some(to))
                );
            }
        }
    }

    #[test]
    fn terminal_states() {
        assert!(ControllerState::Completed.is_terminal());
        assert!(ControllerState::Converged.is_terminal());
        assert!(!ControllerState::Paused.is_terminal());
        assert_eq!(ControllerState::default(), ControllerState::Idle);
    }
}
