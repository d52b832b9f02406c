//! Core types for trade resampling.

use serde::{Deserialize, Serialize};

/// One historical trade outcome supplied by ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalTrade {
    /// Realized P&L in account currency.
    pub pnl: f64,
    /// Realized return as a signed fraction of equity (absent = 0).
    #[serde(default)]
    pub pnl_percent: f64,
}

impl HistoricalTrade {
    /// Create a trade from currency P&L and fractional return.
    #[must_use]
    pub const fn new(pnl: f64, pnl_percent: f64) -> Self {
        Self { pnl, pnl_percent }
    }

    /// Create a trade with only a currency P&L.
    #[must_use]
    pub const fn from_pnl(pnl: f64) -> Self {
        Self {
            pnl,
            pnl_percent: 0.0,
        }
    }

    /// Check if this trade was profitable.
    #[must_use]
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }
}

/// One simulated trader's run through the resampled trade sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Run index within the session.
    pub id: usize,
    /// Equity after each trade; `equity_curve[0]` is the initial equity.
    pub equity_curve: Vec<f64>,
    /// Equity after the last realized trade.
    pub final_equity: f64,
    /// Largest peak-to-trough decline in currency.
    pub max_drawdown: f64,
    /// Largest peak-to-trough decline as percent of the running peak (0-100).
    pub max_drawdown_percent: f64,
    /// Winning trades as percent of realized trades (0-100).
    pub win_rate: f64,
    /// Gross profit / gross loss (0 when there were no losses).
    pub profit_factor: f64,
    /// Longest run of consecutive non-winning trades.
    pub max_consecutive_losses: u32,
    /// Equity touched zero (or the compounding floor) during the run.
    pub is_ruined: bool,
    /// Per-trade Sharpe ratio (mean / sample std dev of $ P&L).
    pub sharpe_ratio: f64,
    /// Per-trade Sortino ratio (mean / downside deviation of $ P&L).
    pub sortino_ratio: f64,
}

impl SimulationResult {
    /// Number of trades actually realized in this run.
    #[must_use]
    pub fn trades_realized(&self) -> usize {
        self.equity_curve.len().saturating_sub(1)
    }

    /// Check if the run ended above its starting equity.
    #[must_use]
    pub fn is_profitable(&self) -> bool {
        self.equity_curve
            .first()
            .is_some_and(|start| self.final_equity > *start)
    }
}
