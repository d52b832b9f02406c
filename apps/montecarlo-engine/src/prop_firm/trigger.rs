//! Runs the prop-firm simulation when a controller session finishes.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::config::PropFirmConfig;
use crate::controller::{SimulationEvent, SimulationObserver};
use crate::simulation::HistoricalTrade;

use super::simulator::run_prop_firm_simulation;
use super::types::AggregatePropFirmStats;

/// Funnel result tagged with the session that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PropFirmRun {
    /// Controller session that triggered the run.
    pub session_id: Uuid,
    /// Aggregated funnel.
    pub stats: AggregatePropFirmStats,
}

/// Observer that sweeps the prop-firm population once per finished session.
///
/// Uses its own PRNG seeded from `seed`, independent of the controller's.
/// The sweep runs outside every lock, so `latest` and `run_count` stay
/// responsive while a population is being simulated.
pub struct PropFirmTrigger {
    pool: Arc<[HistoricalTrade]>,
    config: PropFirmConfig,
    seed: i64,
    claimed: Mutex<HashSet<Uuid>>,
    runs: Mutex<Vec<PropFirmRun>>,
}

impl PropFirmTrigger {
    /// Create a trigger over the same pool the controller resamples.
    #[must_use]
    pub fn new(pool: Arc<[HistoricalTrade]>, config: PropFirmConfig, seed: i64) -> Self {
        Self {
            pool,
            config,
            seed,
            claimed: Mutex::new(HashSet::new()),
            runs: Mutex::new(Vec::new()),
        }
    }

    /// Most recent funnel result, if any session has finished.
    #[must_use]
    pub fn latest(&self) -> Option<PropFirmRun> {
        self.runs.lock().last().cloned()
    }

    /// Number of prop-firm sweeps executed so far.
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.runs.lock().len()
    }
}

impl std::fmt::Debug for PropFirmTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropFirmTrigger")
            .field("pool_size", &self.pool.len())
            .field("num_traders", &self.config.num_traders)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl SimulationObserver for PropFirmTrigger {
    fn on_event(&self, event: &SimulationEvent) {
        let SimulationEvent::Finished { session_id, outcome, .. } = event else {
            return;
        };

        // Claim the session first so concurrent deliveries sweep only once.
        if !self.claimed.lock().insert(*session_id) {
            return;
        }

        info!(
            session_id = %session_id,
            outcome = %outcome,
            num_traders = self.config.num_traders,
            "Running prop-firm simulation"
        );
        let stats =
            run_prop_firm_simulation(&self.pool, &self.config, self.config.num_traders, self.seed);
        self.runs.lock().push(PropFirmRun {
            session_id: *session_id,
            stats,
        });
    }
}
