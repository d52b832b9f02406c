//! Metrics for the Monte Carlo engine.
//!
//! Recorded through the `metrics` facade. The library never installs a
//! recorder; without one every call here is a no-op.

use metrics::{counter, histogram};

// ============================================================================
// Resampling Metrics
// ============================================================================

/// Record one executed batch.
///
/// # Arguments
///
/// * `runs` - Runs produced by the batch
/// * `duration_seconds` - Wall time spent in the batch
pub fn record_batch(runs: usize, duration_seconds: f64) {
    counter!("montecarlo_batches_total").increment(1);
    counter!("montecarlo_runs_total").increment(runs as u64);
    histogram!("montecarlo_batch_duration_seconds").record(duration_seconds);
}

/// Record a session reaching a terminal state.
///
/// # Arguments
///
/// * `outcome` - Terminal state (e.g., "completed", "converged")
pub fn record_session_finished(outcome: &str) {
    counter!(
        "montecarlo_sessions_finished_total",
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

// ============================================================================
// Prop-Firm Metrics
// ============================================================================

/// Record how one simulated career ended.
///
/// # Arguments
///
/// * `outcome` - Career outcome (e.g., "live", "truncated")
pub fn record_career_outcome(outcome: &str) {
    counter!(
        "prop_firm_careers_total",
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_batch() {
        // Without an installed recorder this must not panic
        record_batch(50, 0.002);
    }

    #[test]
    fn test_record_session_finished() {
        record_session_finished("converged");
    }

    #[test]
    fn test_record_career_outcome() {
        record_career_outcome("live");
        record_career_outcome("truncated");
    }
}
