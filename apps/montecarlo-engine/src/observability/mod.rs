//! Observability module for metrics.
//!
//! Counters and histograms for batches, sessions and prop-firm careers.

mod metrics;

pub use self::metrics::{record_batch, record_career_outcome, record_session_finished};
