//! Ledger aggregation: compounded returns, alpha and drawdown.

use super::backtest::BacktestLedger;
use super::regime::Regime;
use chrono::NaiveDate;

/// Base value of the equity index curves.
pub const INDEX_BASE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub strategy_index: f64,
    pub benchmark_index: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    pub periods: usize,
    pub cumulative_strategy: f64,
    pub cumulative_benchmark: f64,
    /// Compounded strategy minus compounded benchmark.
    pub alpha: f64,
    pub periods_beaten: usize,
    pub hit_rate: f64,
    pub max_drawdown: f64,
    pub max_drawdown_duration: usize,
    pub cyclical_periods: usize,
    pub defensive_periods: usize,
}

impl LedgerSummary {
    /// `None` for an empty ledger.
    pub fn compute(ledger: &BacktestLedger) -> Option<Self> {
        if ledger.is_empty() {
            return None;
        }

        let periods = ledger.len();
        let cumulative_strategy = compound(ledger.iter().map(|r| r.strategy_return));
        let cumulative_benchmark = compound(ledger.iter().map(|r| r.benchmark_return));
        let periods_beaten = ledger.iter().filter(|r| r.alpha > 0.0).count();
        let cyclical_periods = ledger
            .iter()
            .filter(|r| r.regime == Regime::Cyclical)
            .count();

        let mut strategy_curve = vec![INDEX_BASE];
        strategy_curve.extend(equity_curve(ledger).iter().map(|p| p.strategy_index));
        let (max_drawdown, max_drawdown_duration) = compute_drawdown(&strategy_curve);

        Some(Self {
            periods,
            cumulative_strategy,
            cumulative_benchmark,
            alpha: cumulative_strategy - cumulative_benchmark,
            periods_beaten,
            hit_rate: periods_beaten as f64 / periods as f64,
            max_drawdown,
            max_drawdown_duration,
            cyclical_periods,
            defensive_periods: periods - cyclical_periods,
        })
    }
}

/// `prod(1 + r) - 1`
pub fn compound(returns: impl Iterator<Item = f64>) -> f64 {
    returns.fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}

/// Strategy and benchmark index levels at the end of each ledger period.
pub fn equity_curve(ledger: &BacktestLedger) -> Vec<EquityPoint> {
    let mut strategy = INDEX_BASE;
    let mut benchmark = INDEX_BASE;
    ledger
        .iter()
        .map(|r| {
            strategy *= 1.0 + r.strategy_return;
            benchmark *= 1.0 + r.benchmark_return;
            EquityPoint {
                date: r.period_end,
                strategy_index: strategy,
                benchmark_index: benchmark,
            }
        })
        .collect()
}

fn compute_drawdown(curve: &[f64]) -> (f64, usize) {
    let Some(&first) = curve.first() else {
        return (0.0, 0);
    };

    let mut peak = first;
    let mut max_dd = 0.0_f64;
    let mut max_dd_duration = 0usize;
    let mut current_dd_duration = 0usize;

    for &value in curve {
        if value >= peak {
            peak = value;
            current_dd_duration = 0;
        } else if peak > 0.0 {
            let dd = (peak - value) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
            current_dd_duration += 1;
            if current_dd_duration > max_dd_duration {
                max_dd_duration = current_dd_duration;
            }
        }
    }

    (max_dd, max_dd_duration)
}
