//! Risk statistics over simulated runs.
//!
//! Implements the aggregate layer on top of per-run results:
//! - Final equity distribution (median/best/worst, probability of profit)
//! - Drawdown percentiles as Value at Risk (95/99/custom)
//! - CAGR at the tails and median, compared to a fixed benchmark
//! - Annualized Sharpe/Sortino from per-trade medians

mod aggregate;
mod constants;
mod format;
mod percentile;

pub use aggregate::{AggregateStatistics, cagr, compute_statistics};
pub use constants::BENCHMARK_CAGR;
pub use format::{format_amount, format_pct, format_ratio, summary_line};
pub use percentile::{percentile, percentile_index, sorted_copy};
