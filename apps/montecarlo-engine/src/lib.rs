// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Monte Carlo Engine - Rust Core Library
//!
//! Deterministic trade-resampling engine for strategy risk analysis.
//!
//! # Architecture
//!
//! - **rng**: Mulberry32 seeded stream shared by every simulation path
//! - **simulation**: bootstrap resampling of historical trades into equity curves
//! - **statistics**: percentile, VaR, CAGR and risk-adjusted reductions
//! - **controller**: resumable batch loop with pause/resume and convergence
//! - **prop_firm**: EVAL → EXPRESS → LIVE career funnel over the same pool
//!
//! Ambient concerns live in `config` (YAML + env interpolation),
//! `telemetry` (tracing subscriber) and `observability` (metrics facade).
//!
//! # Determinism
//!
//! Same seed and inputs produce bit-identical results. The controller and the
//! prop-firm simulator each own a generator built from the configured seed.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Configuration loading and validation.
pub mod config;

/// Incremental simulation controller.
pub mod controller;

/// Crate-level error type.
pub mod error;

/// Metrics recording.
pub mod observability;

/// Prop-firm career simulation.
pub mod prop_firm;

/// Seeded pseudorandom stream.
pub mod rng;

/// Trade resampling.
pub mod simulation;

/// Aggregate risk statistics.
pub mod statistics;

/// Tracing subscriber setup.
pub mod telemetry;

pub use config::{Config, ConfigError, PropFirmConfig, RiskModel, SimulationConfig, load_config};
pub use controller::{
    ControllerError, ControllerState, IncrementalController, PauseHandle, SimulationEvent,
    SimulationObserver, drive,
};
pub use error::EngineError;
pub use prop_firm::{AggregatePropFirmStats, PropFirmTrigger, run_prop_firm_simulation};
pub use rng::Mulberry32;
pub use simulation::{HistoricalTrade, SimulationResult, run_batch};
pub use statistics::{AggregateStatistics, compute_statistics};
