//! Reduction of simulated runs to percentile risk/return statistics.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::simulation::{SimulationResult, finite_or_zero, safe_ratio};

use super::constants::{BENCHMARK_CAGR, P05, P50, P95, P99};
use super::percentile::{percentile, sorted_copy};

/// Aggregate statistics over one result set.
///
/// Always a fresh reduction; nothing here is updated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStatistics {
    /// Number of runs reduced.
    pub num_simulations: usize,

    // Final equity distribution
    /// Median final equity.
    pub median_final_equity: f64,
    /// Best final equity.
    pub best_final_equity: f64,
    /// Worst final equity.
    pub worst_final_equity: f64,
    /// Mean final equity.
    pub mean_final_equity: f64,
    /// Fraction of runs that ended above their starting equity.
    pub probability_of_profit: f64,

    // Drawdown distribution
    /// Median max drawdown (percent).
    pub median_drawdown_percent: f64,
    /// Worst max drawdown (percent).
    pub worst_drawdown_percent: f64,
    /// Fraction of runs marked ruined.
    pub ruin_probability: f64,

    // Growth
    /// CAGR at the 5th percentile of final equity.
    pub cagr_p5: f64,
    /// CAGR at the median final equity.
    pub cagr_median: f64,
    /// CAGR at the 95th percentile of final equity.
    pub cagr_p95: f64,
    /// CAGR at the `1 - confidence` percentile of final equity.
    pub cagr_at_confidence: f64,
    /// Benchmark CAGR used for comparison.
    pub benchmark_cagr: f64,
    /// `cagr_median - benchmark_cagr`.
    pub cagr_vs_benchmark: f64,

    // Value at Risk (drawdown percentiles)
    /// Drawdown percent at the 95th percentile.
    pub var_95: f64,
    /// Drawdown percent at the 99th percentile.
    pub var_99: f64,
    /// Drawdown percent at the configured confidence percentile.
    pub var_at_confidence: f64,
    /// Confidence level used for the custom percentiles.
    pub confidence_level: f64,

    // Risk-adjusted (annualized from per-trade medians)
    /// Median per-run Sharpe × sqrt(trades per year).
    pub annualized_sharpe: f64,
    /// Median per-run Sortino × sqrt(trades per year).
    pub annualized_sortino: f64,

    // Trade statistics
    /// Median per-run win rate (percent).
    pub median_win_rate: f64,
    /// Median per-run profit factor.
    pub median_profit_factor: f64,
    /// Median longest loss streak.
    pub median_max_consecutive_losses: f64,
}

/// Compound annual growth rate implied by reaching `value` from `initial_equity`.
///
/// Defined as 0 when `initial_equity <= 0`, `value <= 0`, or `years <= 0`.
#[must_use]
pub fn cagr(value: f64, initial_equity: f64, years: f64) -> f64 {
    if initial_equity <= 0.0 || value <= 0.0 || years <= 0.0 {
        return 0.0;
    }
    finite_or_zero((value / initial_equity).powf(1.0 / years) - 1.0)
}

/// Reduce simulated runs to aggregate statistics.
///
/// Total: an empty slice returns the all-zero record, and every ratio falls
/// back to 0 on a zero denominator. `results` is never mutated.
///
/// Annualized ratios scale by `sqrt(trades / duration_years)`, where the trade
/// count is the longest realized equity curve. When every `percent_equity` run
/// hits the ruin floor early, that is shorter than the configured count and
/// the annualized figures are understated accordingly.
#[must_use]
pub fn compute_statistics(
    results: &[SimulationResult],
    initial_equity: f64,
    duration_years: f64,
    confidence_level: f64,
) -> AggregateStatistics {
    if results.is_empty() {
        return AggregateStatistics::default();
    }

    let n = results.len() as f64;

    let final_equity = sorted_copy(results.iter().map(|r| r.final_equity));
    let drawdowns = sorted_copy(results.iter().map(|r| r.max_drawdown_percent));
    let sharpes = sorted_copy(results.iter().map(|r| r.sharpe_ratio));
    let sortinos = sorted_copy(results.iter().map(|r| r.sortino_ratio));
    let win_rates = sorted_copy(results.iter().map(|r| r.win_rate));
    let profit_factors = sorted_copy(results.iter().map(|r| r.profit_factor));
    let loss_streaks = sorted_copy(results.iter().map(|r| f64::from(r.max_consecutive_losses)));

    let ruined = results.iter().filter(|r| r.is_ruined).count();
    let profitable = results.iter().filter(|r| r.is_profitable()).count();
    let mean_final_equity = final_equity.iter().sum::<f64>() / n;

    // Ruin-truncated runs are shorter than configured.
    let trades_per_simulation = results
        .iter()
        .map(SimulationResult::trades_realized)
        .max()
        .unwrap_or(0);
    let trades_per_year = if duration_years > 0.0 {
        trades_per_simulation as f64 / duration_years
    } else {
        0.0
    };
    let annualizer = trades_per_year.sqrt();

    let median_cagr = cagr(percentile(&final_equity, P50), initial_equity, duration_years);

    debug!(
        runs = results.len(),
        trades_per_simulation, trades_per_year, "Computing aggregate statistics"
    );

    AggregateStatistics {
        num_simulations: results.len(),
        median_final_equity: percentile(&final_equity, P50),
        best_final_equity: final_equity[final_equity.len() - 1],
        worst_final_equity: final_equity[0],
        mean_final_equity: finite_or_zero(mean_final_equity),
        probability_of_profit: safe_ratio(profitable as f64, n),
        median_drawdown_percent: percentile(&drawdowns, P50),
        worst_drawdown_percent: drawdowns[drawdowns.len() - 1],
        ruin_probability: safe_ratio(ruined as f64, n),
        cagr_p5: cagr(percentile(&final_equity, P05), initial_equity, duration_years),
        cagr_median: median_cagr,
        cagr_p95: cagr(percentile(&final_equity, P95), initial_equity, duration_years),
        cagr_at_confidence: cagr(
            percentile(&final_equity, 1.0 - confidence_level),
            initial_equity,
            duration_years,
        ),
        benchmark_cagr: BENCHMARK_CAGR,
        cagr_vs_benchmark: median_cagr - BENCHMARK_CAGR,
        var_95: percentile(&drawdowns, P95),
        var_99: percentile(&drawdowns, P99),
        var_at_confidence: percentile(&drawdowns, confidence_level),
        confidence_level,
        annualized_sharpe: finite_or_zero(percentile(&sharpes, P50) * annualizer),
        annualized_sortino: finite_or_zero(percentile(&sortinos, P50) * annualizer),
        median_win_rate: percentile(&win_rates, P50),
        median_profit_factor: percentile(&profit_factors, P50),
        median_max_consecutive_losses: percentile(&loss_streaks, P50),
    }
}
