//! Async driver and pause handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::engine::IncrementalController;
use super::error::ControllerError;
use super::state::ControllerState;

/// Shared flag asking the controller to pause before its next batch.
#[derive(Debug, Clone, Default)]
pub struct PauseHandle {
    requested: Arc<AtomicBool>,
}

impl PauseHandle {
    /// Ask the controller to pause. Takes effect between batches.
    pub fn request_pause(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Whether a pause is pending.
    #[must_use]
    pub fn is_pause_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    pub(super) fn clear(&self) {
        self.requested.store(false, Ordering::Release);
    }
}

/// Step the controller until it leaves the running state.
///
/// Yields to the runtime after every batch so other tasks (including one
/// holding a [`PauseHandle`]) get scheduled. Returns the state the session
/// stopped in: paused, completed, or converged. A controller that is not
/// running is returned as-is.
///
/// # Errors
///
/// Propagates [`ControllerError`] from [`IncrementalController::step`].
pub async fn drive(controller: &mut IncrementalController) -> Result<ControllerState, ControllerError> {
    loop {
        let state = controller.step()?;
        if state != ControllerState::Running {
            return Ok(state);
        }
        tokio::task::yield_now().await;
    }
}
