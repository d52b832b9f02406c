//! Prop-firm career simulation over the resampled trade pool.
//!
//! Each career walks EVAL → EXPRESS → LIVE one simulated day at a time. A
//! loss-limit breach in either EVAL or EXPRESS restarts the whole career at
//! EVAL. Hard caps on days and attempts bound every career, so configurations
//! whose targets are unreachable terminate with a truncated result.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::PropFirmConfig;
use crate::observability::record_career_outcome;
use crate::rng::Mulberry32;
use crate::simulation::{HistoricalTrade, safe_ratio};

use super::types::{AggregatePropFirmStats, CareerPhase, VirtualTraderCareer};

/// Maximum simulated days per career before it is truncated.
pub const MAX_DAYS_PER_CAREER: u32 = 2_000;

/// Maximum EVAL attempts (first attempt plus restarts) per career.
pub const MAX_ATTEMPTS_PER_CAREER: u32 = 100;

/// How a single career ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareerOutcome {
    /// Reached LIVE.
    Live,
    /// Stopped by the day or attempt cap.
    Truncated,
}

impl CareerOutcome {
    /// Metric label for this outcome.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Truncated => "truncated",
        }
    }
}

/// Running tallies for a population sweep.
#[derive(Debug, Default)]
struct FunnelTally {
    stats: AggregatePropFirmStats,
    restarts_to_express: Vec<u32>,
    restarts_to_first_payout: Vec<u32>,
    restarts_to_live: Vec<u32>,
}

impl FunnelTally {
    fn finish(mut self, num_traders: usize) -> AggregatePropFirmStats {
        let s = &mut self.stats;
        s.num_traders = num_traders;
        s.live_rate = safe_ratio(s.live_reached as f64, num_traders as f64);
        s.eval_pass_rate = safe_ratio(s.eval_passed as f64, s.eval_attempts as f64);
        s.express_pass_rate = safe_ratio(s.express_passed as f64, s.express_attempts as f64);
        s.avg_restarts_to_express = average(&self.restarts_to_express);
        s.avg_restarts_to_first_payout = average(&self.restarts_to_first_payout);
        s.avg_restarts_to_live = average(&self.restarts_to_live);
        self.stats
    }
}

fn average(values: &[u32]) -> f64 {
    let sum: f64 = values.iter().map(|v| f64::from(*v)).sum();
    safe_ratio(sum, values.len() as f64)
}

/// Simulate `num_traders` careers against the shared trade pool.
///
/// Owns a private `Mulberry32` built from `seed`; callers that also run the
/// resampling controller must not pass its stream here.
pub fn run_prop_firm_simulation(
    trades: &[HistoricalTrade],
    config: &PropFirmConfig,
    num_traders: usize,
    seed: i64,
) -> AggregatePropFirmStats {
    if trades.is_empty() || num_traders == 0 {
        warn!(
            pool = trades.len(),
            num_traders, "Prop-firm simulation skipped: empty pool or population"
        );
        return AggregatePropFirmStats {
            num_traders,
            ..Default::default()
        };
    }

    let start = Instant::now();
    let mut rng = Mulberry32::new(seed);
    let mut tally = FunnelTally::default();

    for trader in 0..num_traders {
        let career = simulate_career(trades, config, &mut rng, &mut tally);
        let outcome = if career.is_live() {
            CareerOutcome::Live
        } else {
            CareerOutcome::Truncated
        };
        record_career_outcome(outcome.as_str());
        if trader % 1000 == 999 {
            debug!(traders = trader + 1, "Prop-firm progress");
        }
    }

    let stats = tally.finish(num_traders);

    info!(
        num_traders,
        live_reached = stats.live_reached,
        eval_attempts = stats.eval_attempts,
        truncated = stats.truncated_careers,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Prop-firm simulation complete"
    );

    stats
}

/// Draw one day's aggregate P&L: 0.5x–1.5x the configured trades (min 1).
fn draw_day_pnl(trades: &[HistoricalTrade], trades_per_day: f64, rng: &mut Mulberry32) -> f64 {
    let count = ((trades_per_day * (0.5 + rng.next_f64())).floor() as usize).max(1);
    (0..count)
        .map(|_| trades[rng.next_index(trades.len())].pnl)
        .sum()
}

fn simulate_career(
    trades: &[HistoricalTrade],
    config: &PropFirmConfig,
    rng: &mut Mulberry32,
    tally: &mut FunnelTally,
) -> VirtualTraderCareer {
    let mut career = VirtualTraderCareer::new(config.account_size);
    let loss_floor = config.account_size - config.max_total_loss;
    tally.stats.eval_attempts += 1;

    while !career.is_live() && career.days < MAX_DAYS_PER_CAREER {
        career.days += 1;
        let day_pnl = draw_day_pnl(trades, config.trades_per_day, rng);

        // A zero limit tolerates no day at all, winning days included.
        let mut blown = (-day_pnl).max(0.0) >= config.max_daily_loss;
        if !blown {
            career.balance += day_pnl;
            blown = career.balance < loss_floor;
        }

        if blown {
            match career.phase {
                CareerPhase::Eval => tally.stats.eval_blown += 1,
                CareerPhase::Express => {
                    tally.stats.express_blown += 1;
                    if career.payouts > 0 {
                        tally.stats.post_payout_blowups += 1;
                    }
                }
                CareerPhase::Live => unreachable!("LIVE careers take no more days"),
            }

            if career.restarts + 1 >= MAX_ATTEMPTS_PER_CAREER {
                break;
            }
            career.restart(config.account_size);
            tally.stats.eval_attempts += 1;
            continue;
        }

        match career.phase {
            CareerPhase::Eval => {
                career.eval_profit += day_pnl.min(config.max_daily_profit_eval);
                if career.eval_profit >= config.profit_target_eval {
                    tally.stats.eval_passed += 1;
                    tally.stats.express_attempts += 1;
                    career.promote_to_express(config.account_size);
                    if config.express_payouts_required == 0 {
                        reach_live(&mut career, tally);
                    }
                }
            }
            CareerPhase::Express => {
                if day_pnl >= config.express_payout_threshold {
                    career.express_good_days += 1;
                    if career.express_good_days >= config.express_days_for_payout {
                        career.express_good_days = 0;
                        career.payouts += 1;
                        tally.stats.total_payouts += 1;
                        if career.restarts_to_first_payout.is_none() {
                            career.restarts_to_first_payout = Some(career.restarts);
                        }
                        if career.payouts >= config.express_payouts_required {
                            reach_live(&mut career, tally);
                        }
                    }
                }
            }
            CareerPhase::Live => unreachable!("LIVE careers take no more days"),
        }
    }

    if !career.is_live() {
        tally.stats.truncated_careers += 1;
        record_milestones(&career, tally);
    }
    career
}

fn reach_live(career: &mut VirtualTraderCareer, tally: &mut FunnelTally) {
    career.promote_to_live();
    tally.stats.express_passed += 1;
    tally.stats.live_reached += 1;
    tally.restarts_to_live.push(career.restarts);
    record_milestones(career, tally);
}

fn record_milestones(career: &VirtualTraderCareer, tally: &mut FunnelTally) {
    if let Some(restarts) = career.restarts_to_express {
        tally.restarts_to_express.push(restarts);
    }
    if let Some(restarts) = career.restarts_to_first_payout {
        tally.restarts_to_first_payout.push(restarts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn easy_config() -> PropFirmConfig {
        PropFirmConfig {
            account_size: 10_000.0,
            max_daily_loss: 1_000.0,
            max_total_loss: 2_000.0,
            profit_target_eval: 1_000.0,
            max_daily_profit_eval: 1_500.0,
            express_payout_threshold: 200.0,
            express_payouts_required: 2,
            express_days_for_payout: 2,
            trades_per_day: 1.0,
            num_traders: 10,
        }
    }

    fn mixed_pool() -> Vec<HistoricalTrade> {
        vec![
            HistoricalTrade::from_pnl(450.0),
            HistoricalTrade::from_pnl(-300.0),
            HistoricalTrade::from_pnl(250.0),
            HistoricalTrade::from_pnl(-700.0),
            HistoricalTrade::from_pnl(120.0),
        ]
    }

    #[test]
    fn test_always_winning_pool_reaches_live_without_restarts() {
        let pool = [HistoricalTrade::from_pnl(500.0)];
        let stats = run_prop_firm_simulation(&pool, &easy_config(), 25, 1);

        assert_eq!(stats.num_traders, 25);
        assert_eq!(stats.eval_attempts, 25);
        assert_eq!(stats.eval_passed, 25);
        assert_eq!(stats.eval_blown, 0);
        assert_eq!(stats.express_attempts, 25);
        assert_eq!(stats.live_reached, 25);
        assert_eq!(stats.express_passed, 25);
        assert_eq!(stats.total_payouts, 50);
        assert_eq!(stats.live_rate, 1.0);
        assert_eq!(stats.avg_restarts_to_live, 0.0);
        assert_eq!(stats.truncated_careers, 0);
    }

    #[test]
    fn test_zero_daily_loss_blows_every_attempt_on_day_one() {
        let pool = [HistoricalTrade::from_pnl(-10.0), HistoricalTrade::from_pnl(0.0)];
        let config = PropFirmConfig {
            max_daily_loss: 0.0,
            ..easy_config()
        };

        let stats = run_prop_firm_simulation(&pool, &config, 7, 3);

        assert_eq!(stats.eval_blown, stats.eval_attempts);
        assert_eq!(stats.eval_attempts, 7 * u64::from(MAX_ATTEMPTS_PER_CAREER));
        assert_eq!(stats.eval_passed, 0);
        assert_eq!(stats.express_attempts, 0);
        assert_eq!(stats.live_reached, 0);
        assert_eq!(stats.truncated_careers, 7);
        assert_eq!(stats.avg_restarts_to_express, 0.0);
    }

    #[test]
    fn test_zero_daily_loss_blows_winning_days_too() {
        let pool = [HistoricalTrade::from_pnl(400.0), HistoricalTrade::from_pnl(-100.0)];
        let config = PropFirmConfig {
            max_daily_loss: 0.0,
            ..PropFirmConfig::default()
        };

        let stats = run_prop_firm_simulation(&pool, &config, 50, 1);

        assert_eq!(stats.eval_blown, stats.eval_attempts);
        assert_eq!(stats.eval_attempts, 50 * u64::from(MAX_ATTEMPTS_PER_CAREER));
        assert_eq!(stats.eval_passed, 0);
        assert_eq!(stats.live_reached, 0);
        assert_eq!(stats.truncated_careers, 50);
    }

    #[test]
    fn test_daily_loss_equal_to_limit_blows_up() {
        let pool = [HistoricalTrade::from_pnl(-1_000.0)];
        let stats = run_prop_firm_simulation(&pool, &easy_config(), 1, 4);

        assert_eq!(stats.eval_blown, u64::from(MAX_ATTEMPTS_PER_CAREER));
        assert_eq!(stats.truncated_careers, 1);
    }

    #[test]
    fn test_career_ends_in_live_phase() {
        let pool = [HistoricalTrade::from_pnl(500.0)];
        let mut rng = Mulberry32::new(1);
        let mut tally = FunnelTally::default();

        let career = simulate_career(&pool, &easy_config(), &mut rng, &mut tally);

        assert_eq!(career.phase, CareerPhase::Live);
        assert_eq!(career.payouts, 2);
        assert_eq!(tally.stats.live_reached, 1);
        assert_eq!(tally.stats.truncated_careers, 0);
    }

    #[test]
    fn test_truncated_career_never_reaches_live() {
        let pool = [HistoricalTrade::from_pnl(1.0), HistoricalTrade::from_pnl(-1.0)];
        let config = PropFirmConfig {
            profit_target_eval: 1e12,
            ..easy_config()
        };
        let mut rng = Mulberry32::new(5);
        let mut tally = FunnelTally::default();

        let career = simulate_career(&pool, &config, &mut rng, &mut tally);

        assert_eq!(career.phase, CareerPhase::Eval);
        assert_eq!(career.days, MAX_DAYS_PER_CAREER);
        assert_eq!(tally.stats.truncated_careers, 1);
    }

    #[test]
    fn test_eval_profit_is_capped_per_day() {
        // One +5000 day only counts 1500 toward a 3000 target: two days to pass.
        let pool = [HistoricalTrade::from_pnl(5_000.0)];
        let config = PropFirmConfig {
            profit_target_eval: 3_000.0,
            max_daily_profit_eval: 1_500.0,
            max_daily_loss: 10_000.0,
            express_payouts_required: 0,
            ..easy_config()
        };

        let stats = run_prop_firm_simulation(&pool, &config, 1, 9);

        assert_eq!(stats.eval_passed, 1);
        assert_eq!(stats.live_reached, 1);
        assert_eq!(stats.total_payouts, 0);
    }

    #[test]
    fn test_unreachable_target_is_truncated_by_day_cap() {
        let pool = [HistoricalTrade::from_pnl(1.0), HistoricalTrade::from_pnl(-1.0)];
        let config = PropFirmConfig {
            profit_target_eval: 1e12,
            ..easy_config()
        };

        let stats = run_prop_firm_simulation(&pool, &config, 3, 5);

        assert_eq!(stats.truncated_careers, 3);
        assert_eq!(stats.eval_attempts, 3);
        assert_eq!(stats.eval_blown, 0);
        assert_eq!(stats.live_rate, 0.0);
    }

    #[test]
    fn test_funnel_conservation_on_mixed_pool() {
        let stats = run_prop_firm_simulation(&mixed_pool(), &easy_config(), 200, 42);

        assert!(stats.eval_passed <= stats.eval_attempts);
        assert!(stats.eval_passed + stats.eval_blown <= stats.eval_attempts);
        assert_eq!(stats.express_attempts, stats.eval_passed);
        assert!(stats.live_reached <= stats.express_attempts);
        assert_eq!(stats.live_reached, stats.express_passed);
        assert!(stats.post_payout_blowups <= stats.express_blown);
        assert!(
            stats.total_payouts
                >= stats.live_reached * u64::from(easy_config().express_payouts_required)
        );
        assert_eq!(
            stats.live_reached + stats.truncated_careers,
            stats.num_traders as u64
        );
    }

    #[test]
    fn test_same_seed_same_funnel() {
        let a = run_prop_firm_simulation(&mixed_pool(), &easy_config(), 50, 8);
        let b = run_prop_firm_simulation(&mixed_pool(), &easy_config(), 50, 8);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_pool_returns_zeroed_record() {
        let stats = run_prop_firm_simulation(&[], &easy_config(), 12, 1);
        assert_eq!(stats.num_traders, 12);
        assert_eq!(stats.eval_attempts, 0);
        assert_eq!(stats.live_rate, 0.0);
    }

    #[test]
    fn test_day_trade_count_has_floor_of_one() {
        let pool = [HistoricalTrade::from_pnl(7.0)];
        let mut rng = Mulberry32::new(2);
        for _ in 0..100 {
            let pnl = draw_day_pnl(&pool, 0.1, &mut rng);
            assert_eq!(pnl, 7.0);
        }
    }
}
