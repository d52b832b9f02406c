//! Progress snapshots for a running session.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Point-in-time progress of a controller session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Runs requested.
    pub total: usize,
    /// Runs accumulated.
    pub completed: usize,
    /// Batches executed.
    pub batches: usize,
    /// Elapsed time in seconds since `start`.
    pub elapsed_secs: f64,
    /// Runs produced per second.
    pub runs_per_sec: f64,
}

impl ProgressSnapshot {
    /// Build a snapshot from counters and the session start instant.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn capture(total: usize, completed: usize, batches: usize, started_at: Option<Instant>) -> Self {
        let elapsed_secs = started_at.map_or(0.0, |t| t.elapsed().as_secs_f64());
        let runs_per_sec = if elapsed_secs > 0.0 {
            completed as f64 / elapsed_secs
        } else {
            0.0
        };

        Self {
            total,
            completed,
            batches,
            elapsed_secs,
            runs_per_sec,
        }
    }

    /// Get completion percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.completed as f64 / self.total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        let snapshot = ProgressSnapshot::capture(200, 50, 1, None);
        assert!((snapshot.percentage() - 25.0).abs() < 1e-12);
        assert_eq!(snapshot.elapsed_secs, 0.0);
        assert_eq!(snapshot.runs_per_sec, 0.0);
    }

    #[test]
    fn test_zero_total_is_complete() {
        let snapshot = ProgressSnapshot::capture(0, 0, 0, None);
        assert_eq!(snapshot.percentage(), 100.0);
    }
}
