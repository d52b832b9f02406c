//! Crate-level error type.
//!
//! Each concern keeps its own `thiserror` enum; [`EngineError`] unifies them
//! for callers that drive the whole engine.

use thiserror::Error;

use crate::config::ConfigError;
use crate::controller::ControllerError;
use crate::telemetry::TelemetryError;

/// Any error surfaced by the engine's edges.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration could not be loaded or failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Illegal controller transition or unusable input.
    #[error(transparent)]
    Controller(#[from] ControllerError),

    /// Logging could not be initialized.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}
