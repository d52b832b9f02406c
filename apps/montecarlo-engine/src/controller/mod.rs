//! Incremental simulation controller.
//!
//! Produces Monte Carlo runs in bounded batches with cooperative
//! pause/resume and early stopping once the running mean stabilises.
//!
//! # Example
//!
//! ```ignore
//! use montecarlo_engine::controller::{IncrementalController, drive};
//!
//! let mut controller = IncrementalController::new(trades, config.simulation)?;
//! controller.add_observer(trigger.clone());
//! controller.start()?;
//! let outcome = drive(&mut controller).await?;
//! let stats = controller.statistics();
//! ```

mod accumulator;
mod driver;
mod engine;
mod error;
mod events;
mod progress;
mod state;

pub use accumulator::SimulationAccumulator;
pub use driver::{PauseHandle, drive};
pub use engine::IncrementalController;
pub use error::ControllerError;
pub use events::{SimulationEvent, SimulationObserver};
pub use progress::ProgressSnapshot;
pub use state::{ControllerAction, ControllerState, ControllerStateMachine};
