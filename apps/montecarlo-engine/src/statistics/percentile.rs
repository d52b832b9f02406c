//! Nearest-rank percentile selection.
//!
//! Convention: sort ascending, take `sorted[floor(p * n)]` with the index
//! clamped to `[0, n - 1]`. No interpolation. The 95th percentile of 1000
//! values is `sorted[950]`.

/// Sort a copy of `values` ascending (NaN-safe total order).
#[must_use]
pub fn sorted_copy(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.into_iter().collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Index selected for percentile `p` (fraction) in a sorted slice of length `n`.
#[must_use]
pub fn percentile_index(p: f64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let raw = (p * n as f64).floor();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else {
        (raw as usize).min(n - 1)
    }
}

/// Value at percentile `p` (fraction) of an ascending slice, or 0 when empty.
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    sorted[percentile_index(p, sorted.len())]
}
