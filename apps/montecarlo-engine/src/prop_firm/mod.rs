//! Prop-firm career simulation.
//!
//! Virtual traders progress through EVAL, EXPRESS and LIVE accounts using
//! day P&L drawn from the historical trade pool. The population sweep is
//! reduced to funnel statistics (attempts, blow-ups, passes, restarts).

mod simulator;
mod trigger;
mod types;

pub use simulator::{
    CareerOutcome, MAX_ATTEMPTS_PER_CAREER, MAX_DAYS_PER_CAREER, run_prop_firm_simulation,
};
pub use trigger::{PropFirmRun, PropFirmTrigger};
pub use types::{AggregatePropFirmStats, CareerPhase, VirtualTraderCareer};
