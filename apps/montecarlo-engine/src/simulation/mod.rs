//! Monte Carlo trade resampling.
//!
//! - **Types**: historical trade outcomes and per-run simulation results
//! - **Resampling**: bootstrap draws that roll one equity curve per run
//! - **Parallel**: rayon fan-out over batches with derived sub-seeds
//! - **Math**: zero-guarded mean / deviation / ratio helpers

mod math;
mod parallel;
mod resampling;
mod types;

pub use math::{downside_deviation, finite_or_zero, mean, safe_ratio, std_dev};
pub use parallel::{derive_batch_seed, run_parallel};
pub use resampling::{COMPOUNDING_RUIN_FLOOR, RunParams, run_batch, simulate_run};
pub use types::{HistoricalTrade, SimulationResult};
