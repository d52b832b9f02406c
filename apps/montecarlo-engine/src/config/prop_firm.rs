//! Prop-firm account rule configuration.

use serde::{Deserialize, Serialize};

/// Account rules for the EVAL → EXPRESS → LIVE career funnel.
///
/// Values are caller-trusted; `validate_config` only rejects the handful that
/// would make a career loop meaningless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropFirmConfig {
    /// Starting balance of every phase.
    #[serde(default = "default_account_size")]
    pub account_size: f64,
    /// Single-day loss that blows up the current phase.
    #[serde(default = "default_max_daily_loss")]
    pub max_daily_loss: f64,
    /// Loss from `account_size` that blows up the current phase.
    #[serde(default = "default_max_total_loss")]
    pub max_total_loss: f64,
    /// Cumulative (capped) profit needed to pass EVAL.
    #[serde(default = "default_profit_target_eval")]
    pub profit_target_eval: f64,
    /// Cap on one day's positive contribution toward the EVAL target.
    #[serde(default = "default_max_daily_profit_eval")]
    pub max_daily_profit_eval: f64,
    /// Minimum day P&L that counts as a qualifying EXPRESS day.
    #[serde(default = "default_express_payout_threshold")]
    pub express_payout_threshold: f64,
    /// Payouts needed in EXPRESS to reach LIVE.
    #[serde(default = "default_express_payouts_required")]
    pub express_payouts_required: u32,
    /// Qualifying days per payout.
    #[serde(default = "default_express_days_for_payout")]
    pub express_days_for_payout: u32,
    /// Average trades per simulated day.
    #[serde(default = "default_trades_per_day")]
    pub trades_per_day: f64,
    /// Careers simulated by the configured driver.
    #[serde(default = "default_num_traders")]
    pub num_traders: usize,
}

impl Default for PropFirmConfig {
    fn default() -> Self {
        Self {
            account_size: default_account_size(),
            max_daily_loss: default_max_daily_loss(),
            max_total_loss: default_max_total_loss(),
            profit_target_eval: default_profit_target_eval(),
            max_daily_profit_eval: default_max_daily_profit_eval(),
            express_payout_threshold: default_express_payout_threshold(),
            express_payouts_required: default_express_payouts_required(),
            express_days_for_payout: default_express_days_for_payout(),
            trades_per_day: default_trades_per_day(),
            num_traders: default_num_traders(),
        }
    }
}

const fn default_account_size() -> f64 {
    50_000.0
}

const fn default_max_daily_loss() -> f64 {
    1_000.0
}

const fn default_max_total_loss() -> f64 {
    2_000.0
}

const fn default_profit_target_eval() -> f64 {
    3_000.0
}

const fn default_max_daily_profit_eval() -> f64 {
    1_500.0
}

const fn default_express_payout_threshold() -> f64 {
    200.0
}

const fn default_express_payouts_required() -> u32 {
    5
}

const fn default_express_days_for_payout() -> u32 {
    5
}

const fn default_trades_per_day() -> f64 {
    3.0
}

const fn default_num_traders() -> usize {
    1_000
}
