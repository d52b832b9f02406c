//! Statistical math utilities for per-run ratio calculations.
//!
//! All helpers return 0 instead of NaN/Infinity on degenerate input.

/// Calculate mean of a slice of values.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().sum();
    Some(sum / values.len() as f64)
}

/// Calculate sample standard deviation (n - 1 denominator).
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let avg = mean(values)?;
    let variance_sum: f64 = values.iter().map(|v| (v - avg) * (v - avg)).sum();
    let variance = variance_sum / (values.len() - 1) as f64;

    Some(variance.max(0.0).sqrt())
}

/// Calculate downside deviation (losses squared against zero, total count).
pub fn downside_deviation(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let variance_sum: f64 = values
        .iter()
        .filter(|v| **v < 0.0)
        .map(|v| v * v)
        .sum();
    let variance = variance_sum / values.len() as f64; // Use total count

    Some(variance.sqrt())
}

/// Divide, returning 0 when the denominator is zero or the result is not finite.
#[must_use]
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    finite_or_zero(numerator / denominator)
}

/// Coerce NaN/Infinity to 0.
#[must_use]
pub const fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Per-trade Sharpe ratio: mean / sample std dev.
#[must_use]
pub fn sharpe_ratio(pnls: &[f64]) -> f64 {
    if is_flat(pnls) {
        return 0.0;
    }
    match (mean(pnls), std_dev(pnls)) {
        (Some(avg), Some(sd)) => safe_ratio(avg, sd),
        _ => 0.0,
    }
}

/// Per-trade Sortino ratio: mean / downside deviation.
///
/// 0 when the realized P&L has no spread, including a run of identical losses.
#[must_use]
pub fn sortino_ratio(pnls: &[f64]) -> f64 {
    if is_flat(pnls) {
        return 0.0;
    }
    match (mean(pnls), downside_deviation(pnls)) {
        (Some(avg), Some(dd)) => safe_ratio(avg, dd),
        _ => 0.0,
    }
}

/// Fewer than two values, or every value equal to the first.
fn is_flat(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}
