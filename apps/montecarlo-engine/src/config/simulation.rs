//! Monte Carlo simulation configuration.

use serde::{Deserialize, Serialize};

/// How a drawn historical outcome is applied to simulated equity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskModel {
    /// Add the trade's currency P&L to equity.
    #[default]
    FixedPnl,
    /// Compound equity by the trade's fractional return.
    PercentEquity,
}

/// Configuration for one Monte Carlo session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Starting account equity for every simulated run.
    #[serde(default = "default_initial_equity")]
    pub initial_equity: f64,
    /// Number of simulated runs requested.
    #[serde(default = "default_num_simulations")]
    pub num_simulations: usize,
    /// Trades drawn per simulated run.
    #[serde(default = "default_trades_per_simulation")]
    pub trades_per_simulation: usize,
    /// Seed for the resampling stream (and, independently, the prop-firm stream).
    #[serde(default = "default_seed")]
    pub seed: i64,
    /// Early-stop tolerance in percent of running mean final equity (0 = disabled).
    #[serde(default = "default_convergence_tolerance")]
    pub convergence_tolerance: f64,
    /// Custom confidence level as a fraction (e.g., 0.95).
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
    /// How outcomes are applied to equity.
    #[serde(default)]
    pub risk_model: RiskModel,
    /// Calendar span one simulated run represents, in years.
    #[serde(default = "default_duration_years")]
    pub duration_years: f64,
    /// Runs executed per controller step.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_equity: default_initial_equity(),
            num_simulations: default_num_simulations(),
            trades_per_simulation: default_trades_per_simulation(),
            seed: default_seed(),
            convergence_tolerance: default_convergence_tolerance(),
            confidence_level: default_confidence_level(),
            risk_model: RiskModel::default(),
            duration_years: default_duration_years(),
            batch_size: default_batch_size(),
        }
    }
}

const fn default_initial_equity() -> f64 {
    10_000.0
}

const fn default_num_simulations() -> usize {
    1_000
}

const fn default_trades_per_simulation() -> usize {
    100
}

const fn default_seed() -> i64 {
    42
}

const fn default_convergence_tolerance() -> f64 {
    0.0
}

const fn default_confidence_level() -> f64 {
    0.95
}

const fn default_duration_years() -> f64 {
    1.0
}

const fn default_batch_size() -> usize {
    50
}
