//! Bootstrap resampling of historical trade outcomes.
//!
//! One run draws `trades_per_simulation` outcomes with replacement from the
//! pool and rolls an equity curve, tracking drawdown, loss streaks and the
//! realized per-trade P&L used for the Sharpe/Sortino ratios.

use tracing::trace;

use crate::config::{RiskModel, SimulationConfig};
use crate::rng::Mulberry32;

use super::math::{safe_ratio, sharpe_ratio, sortino_ratio};
use super::types::{HistoricalTrade, SimulationResult};

/// Equity floor below which compounding stops and the run is marked ruined.
///
/// Applies to `RiskModel::PercentEquity` only. Compounding a near-zero or
/// negative balance has no meaningful interpretation.
pub const COMPOUNDING_RUIN_FLOOR: f64 = 1.0;

/// Parameters of a single resampled run.
#[derive(Debug, Clone, Copy)]
pub struct RunParams {
    /// Trades to draw.
    pub trades: usize,
    /// Starting equity.
    pub initial_equity: f64,
    /// How outcomes are applied.
    pub risk_model: RiskModel,
}

impl From<&SimulationConfig> for RunParams {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            trades: config.trades_per_simulation,
            initial_equity: config.initial_equity,
            risk_model: config.risk_model,
        }
    }
}

/// Roll one simulated equity curve.
///
/// An empty pool yields a zero-trade result rather than panicking; callers are
/// expected to reject empty pools before simulating.
pub fn simulate_run(
    pool: &[HistoricalTrade],
    params: RunParams,
    rng: &mut Mulberry32,
    id: usize,
) -> SimulationResult {
    let mut equity = params.initial_equity;
    let mut equity_curve = Vec::with_capacity(params.trades + 1);
    equity_curve.push(equity);

    let mut pnls = Vec::with_capacity(params.trades);
    let mut peak = equity;
    let mut max_drawdown = 0.0_f64;
    let mut gross_profit = 0.0_f64;
    let mut gross_loss = 0.0_f64;
    let mut wins = 0_usize;
    let mut loss_streak = 0_u32;
    let mut max_consecutive_losses = 0_u32;
    let mut is_ruined = equity <= 0.0;

    if !pool.is_empty() {
        for _ in 0..params.trades {
            let trade = &pool[rng.next_index(pool.len())];

            let (outcome, pnl) = match params.risk_model {
                RiskModel::FixedPnl => (trade.pnl, trade.pnl),
                RiskModel::PercentEquity => (trade.pnl_percent, equity * trade.pnl_percent),
            };
            equity += pnl;
            equity_curve.push(equity);
            pnls.push(pnl);

            if equity > peak {
                peak = equity;
            }
            max_drawdown = max_drawdown.max(peak - equity);

            if outcome > 0.0 {
                wins += 1;
                gross_profit += pnl;
                loss_streak = 0;
            } else {
                gross_loss += pnl.abs();
                loss_streak += 1;
                max_consecutive_losses = max_consecutive_losses.max(loss_streak);
            }

            if equity <= 0.0 {
                is_ruined = true;
            }
            if params.risk_model == RiskModel::PercentEquity && equity <= COMPOUNDING_RUIN_FLOOR {
                is_ruined = true;
                trace!(id, equity, "compounding run hit ruin floor");
                break;
            }
        }
    }

    let realized = pnls.len();

    SimulationResult {
        id,
        final_equity: equity,
        max_drawdown,
        max_drawdown_percent: max_drawdown_percent(&equity_curve),
        win_rate: if realized == 0 {
            0.0
        } else {
            wins as f64 / realized as f64 * 100.0
        },
        profit_factor: safe_ratio(gross_profit, gross_loss),
        max_consecutive_losses,
        is_ruined,
        sharpe_ratio: sharpe_ratio(&pnls),
        sortino_ratio: sortino_ratio(&pnls),
        equity_curve,
    }
}

/// Largest decline from the running peak, as percent of that peak.
///
/// Points whose running peak is not positive are skipped.
fn max_drawdown_percent(curve: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for &equity in curve {
        if equity > peak {
            peak = equity;
        }
        if peak > 0.0 {
            worst = worst.max((peak - equity) / peak * 100.0);
        }
    }
    worst
}

/// Run `batch_size` consecutive simulations from the caller's stream.
///
/// Result ids start at `start_index`. The stream is advanced in place, so
/// consecutive calls continue where the previous batch stopped.
pub fn run_batch(
    pool: &[HistoricalTrade],
    config: &SimulationConfig,
    batch_size: usize,
    start_index: usize,
    rng: &mut Mulberry32,
) -> Vec<SimulationResult> {
    let params = RunParams::from(config);
    (0..batch_size)
        .map(|offset| simulate_run(pool, params, rng, start_index + offset))
        .collect()
}
