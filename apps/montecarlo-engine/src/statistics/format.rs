//! Formatting utilities for statistics display in logs.

use super::aggregate::AggregateStatistics;

/// Format a fraction as percentage string.
#[must_use]
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Format a currency amount with 2 decimal places.
#[must_use]
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

/// Format a ratio, showing "N/A" for zero (undefined) values.
#[must_use]
pub fn format_ratio(value: f64) -> String {
    if value == 0.0 {
        "N/A".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// One-line human summary of a statistics record.
#[must_use]
pub fn summary_line(stats: &AggregateStatistics) -> String {
    format!(
        "runs={} median_equity={} cagr={} (vs benchmark {}) ruin={} var95={}% sharpe={} sortino={}",
        stats.num_simulations,
        format_amount(stats.median_final_equity),
        format_pct(stats.cagr_median),
        format_pct(stats.cagr_vs_benchmark),
        format_pct(stats.ruin_probability),
        format_amount(stats.var_95),
        format_ratio(stats.annualized_sharpe),
        format_ratio(stats.annualized_sortino),
    )
}
