//! Lifecycle events emitted by the controller.
//!
//! Observers are how dependent work hangs off a session without the
//! controller knowing about it. The prop-firm run is wired this way.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::state::ControllerState;

/// Event emitted at a controller transition or batch boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimulationEvent {
    /// A fresh session began.
    Started {
        /// Session identifier.
        session_id: Uuid,
        /// Runs requested.
        target: usize,
    },
    /// One batch was appended to the accumulator.
    BatchCompleted {
        /// Session identifier.
        session_id: Uuid,
        /// 1-based batch number.
        batch: usize,
        /// Runs accumulated so far.
        completed: usize,
        /// Running mean final equity after this batch.
        running_mean: f64,
    },
    /// Scheduling stopped; results retained.
    Paused {
        /// Session identifier.
        session_id: Uuid,
        /// Runs accumulated so far.
        completed: usize,
    },
    /// Scheduling continued on the same stream.
    Resumed {
        /// Session identifier.
        session_id: Uuid,
        /// Runs accumulated so far.
        completed: usize,
    },
    /// The session entered a terminal state.
    Finished {
        /// Session identifier.
        session_id: Uuid,
        /// `Completed` or `Converged`.
        outcome: ControllerState,
        /// Runs accumulated.
        completed: usize,
        /// Batches executed.
        batches: usize,
    },
}

impl SimulationEvent {
    /// Session the event belongs to.
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        match self {
            Self::Started { session_id, .. }
            | Self::BatchCompleted { session_id, .. }
            | Self::Paused { session_id, .. }
            | Self::Resumed { session_id, .. }
            | Self::Finished { session_id, .. } => *session_id,
        }
    }
}

/// Receiver of controller events.
///
/// Called synchronously on the controller's thread, between batches.
pub trait SimulationObserver: Send + Sync {
    /// Handle one event.
    fn on_event(&self, event: &SimulationEvent);
}
