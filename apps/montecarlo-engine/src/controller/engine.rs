//! Incremental, resumable simulation controller.
//!
//! A session produces runs one bounded batch at a time. Between batches the
//! caller may pause, observe progress, or interleave other work; the batch in
//! flight always finishes. The PRNG is created once per `start` and carried
//! across pause/resume, so an interrupted session yields the same runs as an
//! uninterrupted one.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::SimulationConfig;
use crate::observability::{record_batch, record_session_finished};
use crate::rng::Mulberry32;
use crate::simulation::{HistoricalTrade, SimulationResult, run_batch};
use crate::statistics::{AggregateStatistics, compute_statistics, summary_line};

use super::accumulator::SimulationAccumulator;
use super::driver::PauseHandle;
use super::error::ControllerError;
use super::events::{SimulationEvent, SimulationObserver};
use super::progress::ProgressSnapshot;
use super::state::{ControllerAction, ControllerState, ControllerStateMachine};

/// Batch-at-a-time Monte Carlo session driver.
pub struct IncrementalController {
    pool: Arc<[HistoricalTrade]>,
    config: SimulationConfig,
    state: ControllerState,
    rng: Mulberry32,
    accumulator: SimulationAccumulator,
    observers: Vec<Arc<dyn SimulationObserver>>,
    pause: PauseHandle,
    session_id: Uuid,
    started_at: Option<Instant>,
}

impl std::fmt::Debug for IncrementalController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncrementalController")
            .field("session_id", &self.session_id)
            .field("state", &self.state)
            .field("completed", &self.accumulator.len())
            .field("batches", &self.accumulator.batches())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl IncrementalController {
    /// Create an idle controller over a shared trade pool.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::EmptyPool`] if `pool` has no trades.
    pub fn new(
        pool: impl Into<Arc<[HistoricalTrade]>>,
        config: SimulationConfig,
    ) -> Result<Self, ControllerError> {
        let pool = pool.into();
        if pool.is_empty() {
            return Err(ControllerError::EmptyPool);
        }

        Ok(Self {
            rng: Mulberry32::new(config.seed),
            accumulator: SimulationAccumulator::default(),
            pool,
            config,
            state: ControllerState::Idle,
            observers: Vec::new(),
            pause: PauseHandle::default(),
            session_id: Uuid::nil(),
            started_at: None,
        })
    }

    /// Register an observer for lifecycle events.
    pub fn add_observer(&mut self, observer: Arc<dyn SimulationObserver>) {
        self.observers.push(observer);
    }

    /// Begin a fresh session: new id, cleared results, reseeded stream.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::InvalidTransition`] if a session is running or paused.
    pub fn start(&mut self) -> Result<Uuid, ControllerError> {
        self.state = ControllerStateMachine::transition(self.state, ControllerAction::Start)?;

        self.session_id = Uuid::new_v4();
        self.rng = Mulberry32::new(self.config.seed);
        self.accumulator = SimulationAccumulator::with_capacity(self.config.num_simulations);
        self.pause.clear();
        self.started_at = Some(Instant::now());

        info!(
            session_id = %self.session_id,
            num_simulations = self.config.num_simulations,
            batch_size = self.config.batch_size,
            seed = self.config.seed,
            pool_size = self.pool.len(),
            "Simulation session started"
        );

        self.emit(&SimulationEvent::Started {
            session_id: self.session_id,
            target: self.config.num_simulations,
        });

        Ok(self.session_id)
    }

    /// Stop scheduling batches. Accumulated results are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::InvalidTransition`] unless running.
    pub fn pause(&mut self) -> Result<(), ControllerError> {
        self.state = ControllerStateMachine::transition(self.state, ControllerAction::Pause)?;
        self.pause.clear();

        info!(
            session_id = %self.session_id,
            completed = self.accumulator.len(),
            "Simulation session paused"
        );
        self.emit(&SimulationEvent::Paused {
            session_id: self.session_id,
            completed: self.accumulator.len(),
        });
        Ok(())
    }

    /// Continue a paused session on the same PRNG stream.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::InvalidTransition`] unless paused.
    pub fn resume(&mut self) -> Result<(), ControllerError> {
        self.state = ControllerStateMachine::transition(self.state, ControllerAction::Resume)?;
        self.pause.clear();

        info!(
            session_id = %self.session_id,
            completed = self.accumulator.len(),
            "Simulation session resumed"
        );
        self.emit(&SimulationEvent::Resumed {
            session_id: self.session_id,
            completed: self.accumulator.len(),
        });
        Ok(())
    }

    /// Execute one batch if running.
    ///
    /// A pending pause request is honored before the batch starts. Outside
    /// the running state this is a no-op returning the current state.
    ///
    /// # Errors
    ///
    /// Only propagates transition errors, which cannot occur from `Running`.
    pub fn step(&mut self) -> Result<ControllerState, ControllerError> {
        if self.state != ControllerState::Running {
            return Ok(self.state);
        }
        if self.pause.is_pause_requested() {
            self.pause()?;
            return Ok(self.state);
        }

        let target = self.config.num_simulations;
        let remaining = target.saturating_sub(self.accumulator.len());
        if remaining == 0 {
            return self.finish(ControllerAction::Complete);
        }

        let size = self.config.batch_size.max(1).min(remaining);
        let batch_start = Instant::now();
        let batch = run_batch(
            &self.pool,
            &self.config,
            size,
            self.accumulator.len(),
            &mut self.rng,
        );
        let running_mean = self.accumulator.push_batch(batch);
        let batch_number = self.accumulator.batches();
        record_batch(size, batch_start.elapsed().as_secs_f64());

        debug!(
            session_id = %self.session_id,
            batch = batch_number,
            completed = self.accumulator.len(),
            running_mean,
            "Batch completed"
        );
        self.emit(&SimulationEvent::BatchCompleted {
            session_id: self.session_id,
            batch: batch_number,
            completed: self.accumulator.len(),
            running_mean,
        });

        if self.accumulator.len() >= target {
            self.finish(ControllerAction::Complete)
        } else if self.accumulator.has_converged(self.config.convergence_tolerance) {
            self.finish(ControllerAction::Converge)
        } else {
            Ok(self.state)
        }
    }

    fn finish(&mut self, action: ControllerAction) -> Result<ControllerState, ControllerError> {
        self.state = ControllerStateMachine::transition(self.state, action)?;
        record_session_finished(&self.state.to_string());

        let stats = self.statistics();
        if stats.ruin_probability > 0.5 {
            warn!(
                session_id = %self.session_id,
                ruin_probability = stats.ruin_probability,
                "Majority of simulated runs were ruined"
            );
        }
        info!(
            session_id = %self.session_id,
            outcome = %self.state,
            batches = self.accumulator.batches(),
            summary = %summary_line(&stats),
            "Simulation session finished"
        );

        self.emit(&SimulationEvent::Finished {
            session_id: self.session_id,
            outcome: self.state,
            completed: self.accumulator.len(),
            batches: self.accumulator.batches(),
        });
        Ok(self.state)
    }

    fn emit(&self, event: &SimulationEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }

    /// Reduce the runs accumulated so far.
    #[must_use]
    pub fn statistics(&self) -> AggregateStatistics {
        compute_statistics(
            self.accumulator.results(),
            self.config.initial_equity,
            self.config.duration_years,
            self.config.confidence_level,
        )
    }

    /// Current progress.
    #[must_use]
    pub fn progress(&self) -> ProgressSnapshot {
        ProgressSnapshot::capture(
            self.config.num_simulations,
            self.accumulator.len(),
            self.accumulator.batches(),
            self.started_at,
        )
    }

    /// Cloneable handle for requesting a pause from elsewhere.
    #[must_use]
    pub fn pause_handle(&self) -> PauseHandle {
        self.pause.clone()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ControllerState {
        self.state
    }

    /// Identifier of the current session (nil before the first `start`).
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Runs accumulated in the current session.
    #[must_use]
    pub fn results(&self) -> &[SimulationResult] {
        self.accumulator.results()
    }

    /// Running mean final equity after each batch.
    #[must_use]
    pub fn running_means(&self) -> &[f64] {
        self.accumulator.running_means()
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Shared trade pool.
    #[must_use]
    pub fn pool(&self) -> Arc<[HistoricalTrade]> {
        Arc::clone(&self.pool)
    }
}
