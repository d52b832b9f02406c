//! Core types for prop-firm career simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Account phase of a virtual trader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CareerPhase {
    /// Evaluation: hit the profit target without breaching loss limits.
    Eval,
    /// Funded express account: accumulate qualifying days for payouts.
    Express,
    /// Fully funded (terminal).
    Live,
}

impl fmt::Display for CareerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eval => write!(f, "EVAL"),
            Self::Express => write!(f, "EXPRESS"),
            Self::Live => write!(f, "LIVE"),
        }
    }
}

/// Mutable state of one trader's career. Discarded after aggregation.
#[derive(Debug, Clone)]
pub struct VirtualTraderCareer {
    /// Current phase.
    pub phase: CareerPhase,
    /// Current account balance.
    pub balance: f64,
    /// Capped profit accumulated toward the EVAL target.
    pub eval_profit: f64,
    /// Qualifying EXPRESS days since the last payout.
    pub express_good_days: u32,
    /// Payouts received in the current EXPRESS attempt.
    pub payouts: u32,
    /// Full career restarts so far.
    pub restarts: u32,
    /// Simulated days elapsed.
    pub days: u32,
    /// Restarts needed to first reach EXPRESS.
    pub restarts_to_express: Option<u32>,
    /// Restarts needed to receive the first payout.
    pub restarts_to_first_payout: Option<u32>,
}

impl VirtualTraderCareer {
    /// Start a fresh career in EVAL.
    #[must_use]
    pub const fn new(account_size: f64) -> Self {
        Self {
            phase: CareerPhase::Eval,
            balance: account_size,
            eval_profit: 0.0,
            express_good_days: 0,
            payouts: 0,
            restarts: 0,
            days: 0,
            restarts_to_express: None,
            restarts_to_first_payout: None,
        }
    }

    /// Reset balance and all phase progress, returning to EVAL.
    pub const fn restart(&mut self, account_size: f64) {
        self.phase = CareerPhase::Eval;
        self.balance = account_size;
        self.eval_profit = 0.0;
        self.express_good_days = 0;
        self.payouts = 0;
        self.restarts += 1;
    }

    /// Promote from EVAL to EXPRESS with a fresh balance.
    pub const fn promote_to_express(&mut self, account_size: f64) {
        self.phase = CareerPhase::Express;
        self.balance = account_size;
        self.eval_profit = 0.0;
        self.express_good_days = 0;
        self.payouts = 0;
        if self.restarts_to_express.is_none() {
            self.restarts_to_express = Some(self.restarts);
        }
    }

    /// Promote from EXPRESS to LIVE. Terminal: the career takes no more days.
    pub const fn promote_to_live(&mut self) {
        self.phase = CareerPhase::Live;
    }

    /// Whether the career reached LIVE.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self.phase, CareerPhase::Live)
    }
}

/// Funnel statistics over a population of careers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatePropFirmStats {
    /// Careers simulated.
    pub num_traders: usize,

    // EVAL
    /// EVAL attempts started.
    pub eval_attempts: u64,
    /// EVAL attempts that breached a loss limit.
    pub eval_blown: u64,
    /// EVAL attempts that hit the profit target.
    pub eval_passed: u64,

    // EXPRESS
    /// EXPRESS attempts started (promotions from EVAL).
    pub express_attempts: u64,
    /// EXPRESS attempts that breached a loss limit.
    pub express_blown: u64,
    /// EXPRESS attempts that earned the required payouts.
    pub express_passed: u64,
    /// EXPRESS blow-ups after at least one payout in that attempt.
    pub post_payout_blowups: u64,
    /// Payouts issued across all careers.
    pub total_payouts: u64,

    // LIVE
    /// Careers that reached LIVE.
    pub live_reached: u64,
    /// `live_reached / num_traders`.
    pub live_rate: f64,

    // Rates
    /// `eval_passed / eval_attempts`.
    pub eval_pass_rate: f64,
    /// `express_passed / express_attempts`.
    pub express_pass_rate: f64,

    // Restart milestones (averaged over traders reaching them)
    /// Average restarts before first reaching EXPRESS.
    pub avg_restarts_to_express: f64,
    /// Average restarts before the first payout.
    pub avg_restarts_to_first_payout: f64,
    /// Average restarts before reaching LIVE.
    pub avg_restarts_to_live: f64,

    /// Careers stopped by the day or attempt cap.
    pub truncated_careers: u64,
}
