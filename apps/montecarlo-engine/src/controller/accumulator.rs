//! Cross-batch result accumulator.

use crate::simulation::SimulationResult;

/// Results and running means collected over one session.
///
/// Owned by the controller and extended by reference after each batch.
#[derive(Debug, Clone, Default)]
pub struct SimulationAccumulator {
    results: Vec<SimulationResult>,
    running_means: Vec<f64>,
    equity_sum: f64,
}

impl SimulationAccumulator {
    /// Create an empty accumulator with room for `capacity` runs.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Vec::with_capacity(capacity),
            running_means: Vec::new(),
            equity_sum: 0.0,
        }
    }

    /// Append a batch and record the new running mean final equity.
    #[allow(clippy::cast_precision_loss)]
    pub fn push_batch(&mut self, batch: Vec<SimulationResult>) -> f64 {
        for result in &batch {
            self.equity_sum += result.final_equity;
        }
        self.results.extend(batch);

        let mean = if self.results.is_empty() {
            0.0
        } else {
            self.equity_sum / self.results.len() as f64
        };
        self.running_means.push(mean);
        mean
    }

    /// Whether the running mean has stabilised within `tolerance` percent.
    ///
    /// Only evaluated after more than two batches. A tolerance of 0 never
    /// converges, and a zero prior mean skips the comparison.
    #[must_use]
    pub fn has_converged(&self, tolerance: f64) -> bool {
        if tolerance <= 0.0 || self.running_means.len() <= 2 {
            return false;
        }
        let [.., prev, current] = self.running_means.as_slice() else {
            return false;
        };
        if *prev == 0.0 {
            return false;
        }
        ((current - prev) / prev.abs() * 100.0).abs() < tolerance
    }

    /// Drop everything from a previous session.
    pub fn clear(&mut self) {
        self.results.clear();
        self.running_means.clear();
        self.equity_sum = 0.0;
    }

    /// Accumulated results, in run order.
    #[must_use]
    pub fn results(&self) -> &[SimulationResult] {
        &self.results
    }

    /// Running mean final equity after each batch.
    #[must_use]
    pub fn running_means(&self) -> &[f64] {
        &self.running_means
    }

    /// Batches appended so far.
    #[must_use]
    pub fn batches(&self) -> usize {
        self.running_means.len()
    }

    /// Runs accumulated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no runs have been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
