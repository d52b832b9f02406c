//! Error types for the incremental controller.

use thiserror::Error;

use super::state::{ControllerAction, ControllerState};

/// Errors from controller lifecycle operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// The requested action is not allowed from the current state.
    #[error("Cannot {action} while {from}")]
    InvalidTransition {
        /// State the controller was in.
        from: ControllerState,
        /// Action that was rejected.
        action: ControllerAction,
    },

    /// No historical trades to resample from.
    #[error("Historical trade pool is empty")]
    EmptyPool,
}
