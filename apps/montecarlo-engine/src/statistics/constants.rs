//! Constants for aggregate risk statistics.

/// Benchmark compound annual growth rate (broad equity index, 10%/yr).
pub const BENCHMARK_CAGR: f64 = 0.10;
/// Lower tail percentile of final equity.
pub const P05: f64 = 0.05;
/// Median.
pub const P50: f64 = 0.50;
/// Upper tail percentile of final equity; also the 95% VaR percentile.
pub const P95: f64 = 0.95;
/// 99% VaR percentile.
pub const P99: f64 = 0.99;
