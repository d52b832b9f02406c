//! Integration tests for the Monte Carlo session lifecycle.
//!
//! Exercises config loading → controller → statistics → prop-firm trigger
//! through the public API only.

// Allow unwrap in tests - tests should panic on unexpected errors
#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::io::Write;
use std::sync::Arc;

use montecarlo_engine::config::{PropFirmConfig, RiskModel, SimulationConfig, load_config};
use montecarlo_engine::controller::{
    ControllerState, IncrementalController, PauseHandle, SimulationEvent, SimulationObserver,
    drive,
};
use montecarlo_engine::prop_firm::PropFirmTrigger;
use montecarlo_engine::rng::Mulberry32;
use montecarlo_engine::simulation::{HistoricalTrade, run_batch};

// =============================================================================
// Fixtures
// =============================================================================

fn trade_pool() -> Vec<HistoricalTrade> {
    vec![
        HistoricalTrade::new(220.0, 0.022),
        HistoricalTrade::new(-140.0, -0.014),
        HistoricalTrade::new(95.0, 0.0095),
        HistoricalTrade::new(-60.0, -0.006),
        HistoricalTrade::new(310.0, 0.031),
        HistoricalTrade::new(-250.0, -0.025),
    ]
}

fn session_config(num_simulations: usize, batch_size: usize) -> SimulationConfig {
    SimulationConfig {
        num_simulations,
        batch_size,
        trades_per_simulation: 50,
        seed: 7,
        ..Default::default()
    }
}

/// Requests a pause once a given batch number has completed.
struct PauseAfterBatch {
    handle: PauseHandle,
    batch: usize,
}

impl SimulationObserver for PauseAfterBatch {
    fn on_event(&self, event: &SimulationEvent) {
        if let SimulationEvent::BatchCompleted { batch, .. } = event {
            if *batch == self.batch {
                self.handle.request_pause();
            }
        }
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn fixed_pnl_reference_curve() {
    let pool = [HistoricalTrade::from_pnl(100.0), HistoricalTrade::from_pnl(-50.0)];
    let config = SimulationConfig {
        initial_equity: 1000.0,
        trades_per_simulation: 2,
        seed: 1,
        risk_model: RiskModel::FixedPnl,
        ..Default::default()
    };
    let mut rng = Mulberry32::new(config.seed);

    let results = run_batch(&pool, &config, 1, 0, &mut rng);

    assert_eq!(results[0].equity_curve, vec![1000.0, 950.0, 1050.0]);
}

#[test]
fn percent_equity_total_loss_is_immediate_ruin() {
    let pool = [HistoricalTrade::new(-1000.0, -1.0)];
    let config = SimulationConfig {
        initial_equity: 5000.0,
        trades_per_simulation: 25,
        risk_model: RiskModel::PercentEquity,
        ..Default::default()
    };
    let mut rng = Mulberry32::new(3);

    let results = run_batch(&pool, &config, 4, 0, &mut rng);

    for result in results {
        assert_eq!(result.equity_curve, vec![5000.0, 0.0]);
        assert!(result.is_ruined);
    }
}

#[tokio::test]
async fn zero_variance_pool_converges_on_third_batch() {
    let pool = vec![HistoricalTrade::from_pnl(40.0); 4];
    let config = SimulationConfig {
        convergence_tolerance: 0.1,
        ..session_config(10_000, 50)
    };
    let mut controller = IncrementalController::new(pool, config).unwrap();
    controller.start().unwrap();

    let outcome = drive(&mut controller).await.unwrap();

    assert_eq!(outcome, ControllerState::Converged);
    assert_eq!(controller.progress().batches, 3);
    let stats = controller.statistics();
    assert_eq!(stats.annualized_sharpe, 0.0);
    assert_eq!(stats.annualized_sortino, 0.0);
    assert_eq!(stats.var_95, 0.0);
}

#[tokio::test]
async fn paused_session_matches_uninterrupted_session() {
    let config = session_config(400, 50);

    let mut straight = IncrementalController::new(trade_pool(), config.clone()).unwrap();
    straight.start().unwrap();
    assert_eq!(drive(&mut straight).await.unwrap(), ControllerState::Completed);

    let mut interrupted = IncrementalController::new(trade_pool(), config).unwrap();
    let handle = interrupted.pause_handle();
    interrupted.add_observer(Arc::new(PauseAfterBatch { handle, batch: 3 }));
    interrupted.start().unwrap();

    assert_eq!(drive(&mut interrupted).await.unwrap(), ControllerState::Paused);
    assert_eq!(interrupted.results().len(), 150);
    let partial = interrupted.statistics();
    assert_eq!(partial.num_simulations, 150);

    interrupted.resume().unwrap();
    assert_eq!(drive(&mut interrupted).await.unwrap(), ControllerState::Completed);

    assert_eq!(interrupted.results(), straight.results());
    assert_eq!(interrupted.statistics(), straight.statistics());
}

#[tokio::test]
async fn prop_firm_trigger_fires_once_per_session() {
    let pool: Arc<[HistoricalTrade]> = trade_pool().into();
    let trigger = Arc::new(PropFirmTrigger::new(
        Arc::clone(&pool),
        PropFirmConfig {
            num_traders: 50,
            ..Default::default()
        },
        7,
    ));

    let mut controller =
        IncrementalController::new(Arc::clone(&pool), session_config(120, 50)).unwrap();
    controller.add_observer(trigger.clone());

    let first = controller.start().unwrap();
    controller.step().unwrap();
    assert_eq!(trigger.run_count(), 0);
    drive(&mut controller).await.unwrap();
    assert_eq!(trigger.run_count(), 1);
    assert_eq!(trigger.latest().unwrap().session_id, first);

    // Stepping a finished session does not fire again
    controller.step().unwrap();
    assert_eq!(trigger.run_count(), 1);

    let second = controller.start().unwrap();
    drive(&mut controller).await.unwrap();
    assert_eq!(trigger.run_count(), 2);
    assert_eq!(trigger.latest().unwrap().session_id, second);
}

#[tokio::test]
async fn config_file_drives_full_session() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r"
simulation:
  initial_equity: 25000
  num_simulations: 90
  trades_per_simulation: 40
  seed: 11
  batch_size: 30
  risk_model: percent_equity
prop_firm:
  num_traders: 25
observability:
  logging:
    level: warn
    format: pretty
"
    )
    .unwrap();

    let config = load_config(file.path().to_str()).unwrap();
    assert_eq!(config.simulation.risk_model, RiskModel::PercentEquity);

    let pool: Arc<[HistoricalTrade]> = trade_pool().into();
    let trigger = Arc::new(PropFirmTrigger::new(
        Arc::clone(&pool),
        config.prop_firm.clone(),
        config.simulation.seed,
    ));
    let mut controller = IncrementalController::new(pool, config.simulation).unwrap();
    controller.add_observer(trigger.clone());
    controller.start().unwrap();

    assert_eq!(drive(&mut controller).await.unwrap(), ControllerState::Completed);

    let stats = controller.statistics();
    assert_eq!(stats.num_simulations, 90);
    assert!(stats.worst_final_equity <= stats.median_final_equity);
    assert!(stats.median_final_equity <= stats.best_final_equity);
    assert_eq!(trigger.latest().unwrap().stats.num_traders, 25);
}
