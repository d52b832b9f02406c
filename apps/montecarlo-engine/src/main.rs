//! Monte Carlo Engine Binary
//!
//! Runs one simulation session over a historical trade file and logs the
//! resulting risk statistics and prop-firm funnel.
//!
//! # Usage
//!
//! ```bash
//! TRADES_PATH=trades.json cargo run --bin montecarlo-engine
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `TRADES_PATH`: JSON array of `{ "pnl": f64, "pnl_percent": f64 }` objects
//!
//! ## Optional
//! - `MONTECARLO_CONFIG`: YAML config path (default: config.yaml)
//! - `RUST_LOG`: Log filter (overrides `observability.logging.level`)

use std::sync::Arc;

use anyhow::{Context, Result};
use montecarlo_engine::config::load_config;
use montecarlo_engine::controller::{IncrementalController, drive};
use montecarlo_engine::prop_firm::PropFirmTrigger;
use montecarlo_engine::simulation::HistoricalTrade;
use montecarlo_engine::telemetry::init_telemetry;

/// Default config path when `MONTECARLO_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

fn load_trades(path: &str) -> Result<Vec<HistoricalTrade>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trades file '{path}'"))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse trades file '{path}'"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config_path =
        std::env::var("MONTECARLO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(Some(config_path.as_str()))?;
    init_telemetry(&config.observability.logging)?;

    tracing::info!(config_path = %config_path, "Starting Monte Carlo engine");

    let trades_path = std::env::var("TRADES_PATH").context("TRADES_PATH is not set")?;
    let trades: Arc<[HistoricalTrade]> = load_trades(&trades_path)?.into();
    tracing::info!(trades = trades.len(), path = %trades_path, "Loaded trade pool");

    let trigger = Arc::new(PropFirmTrigger::new(
        Arc::clone(&trades),
        config.prop_firm.clone(),
        config.simulation.seed,
    ));

    let mut controller = IncrementalController::new(Arc::clone(&trades), config.simulation)?;
    controller.add_observer(trigger.clone());
    controller.start()?;
    let outcome = drive(&mut controller).await?;

    let statistics = controller.statistics();
    tracing::info!(
        outcome = %outcome,
        statistics = %serde_json::to_string(&statistics)?,
        "Risk statistics"
    );

    if let Some(run) = trigger.latest() {
        tracing::info!(
            session_id = %run.session_id,
            funnel = %serde_json::to_string(&run.stats)?,
            "Prop-firm funnel"
        );
    }

    Ok(())
}
