//! Periodic regime rotation backtest.
//!
//! At each rebalance index `i` the regime picks a pool, the pool is ranked by
//! trailing one-period return (prices at `i-1` and `i`), the top K are held
//! equal weight, and the realized return to `i+1` is compared with the
//! benchmark. Decisions read prices at indices `<= i` only.

use crate::domain::error::RotatorError;
use crate::domain::regime::{Regime, RegimeSignal, SignalBasis};
use crate::domain::store::{Frequency, TimeSeriesStore};
use crate::domain::universe::PoolPartition;
use chrono::NaiveDate;
use std::cmp::Ordering;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct RotationConfig {
    pub frequency: Frequency,
    pub ma_window: usize,
    pub basis: SignalBasis,
    pub top_k: usize,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            frequency: Frequency::Monthly,
            ma_window: 50,
            basis: SignalBasis::Period,
            top_k: 3,
        }
    }
}

impl RotationConfig {
    /// Panel length below which no step can complete. With a daily signal
    /// the warm-up happens on the daily series, so only a decision period
    /// and its successor are needed.
    pub fn min_periods(&self) -> usize {
        match self.basis {
            SignalBasis::Period => self.ma_window + 2,
            SignalBasis::Daily => 2,
        }
    }
}

/// Resampled price panel plus the pool partition it is traded on.
#[derive(Debug, Clone, Copy)]
pub struct RotationPanel<'a> {
    store: &'a TimeSeriesStore,
    pools: &'a PoolPartition,
}

impl<'a> RotationPanel<'a> {
    pub fn new(store: &'a TimeSeriesStore, pools: &'a PoolPartition) -> Self {
        Self { store, pools }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        self.store.calendar()
    }

    pub fn pools(&self) -> &PoolPartition {
        self.pools
    }

    pub fn price(&self, id: &str, i: usize) -> Option<f64> {
        self.store.aligned(id)?.get(i).copied().flatten()
    }

    pub fn benchmark_price(&self, i: usize) -> Option<f64> {
        self.price(self.store.benchmark_id(), i)
    }

    fn period_return(&self, id: &str, from: usize, to: usize) -> Option<f64> {
        simple_return(self.price(id, from)?, self.price(id, to)?)
    }
}

fn simple_return(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        return None;
    }
    let r = to / from - 1.0;
    r.is_finite().then_some(r)
}

/// Builds the regime signal on the requested basis, aligned to the panel.
pub fn regime_signal(
    daily: &TimeSeriesStore,
    panel: &TimeSeriesStore,
    driver_a: &str,
    driver_b: &str,
    config: &RotationConfig,
) -> Result<RegimeSignal, RotatorError> {
    match config.basis {
        SignalBasis::Daily => {
            RegimeSignal::from_daily(daily, driver_a, driver_b, config.ma_window, panel.calendar())
        }
        SignalBasis::Period => {
            let a = period_driver(panel, driver_a)?;
            let b = period_driver(panel, driver_b)?;
            Ok(RegimeSignal::from_periods(panel.calendar(), a, b, config.ma_window))
        }
    }
}

fn period_driver<'a>(
    panel: &'a TimeSeriesStore,
    id: &str,
) -> Result<&'a [Option<f64>], RotatorError> {
    panel
        .aligned(id)
        .filter(|p| p.iter().any(Option::is_some))
        .ok_or_else(|| RotatorError::MissingDriver { id: id.to_string() })
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedInstrument {
    pub id: String,
    /// `None` when the previous period has no price; ranks last.
    pub trailing_return: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RotationDecision {
    pub decision_date: NaiveDate,
    pub index: usize,
    pub regime: Regime,
    pub selected: Vec<String>,
    pub ranking: Vec<RankedInstrument>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestRecord {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub regime: Regime,
    pub selected: Vec<String>,
    pub ranking: Vec<RankedInstrument>,
    pub strategy_return: f64,
    pub benchmark_return: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BacktestLedger {
    pub records: Vec<BacktestRecord>,
}

impl BacktestLedger {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BacktestRecord> {
        self.records.iter()
    }

    /// Drops records decided before `start`; warm-up history is fetched
    /// ahead of the reporting window.
    pub fn since(self, start: NaiveDate) -> Self {
        Self {
            records: self
                .records
                .into_iter()
                .filter(|r| r.period_start >= start)
                .collect(),
        }
    }
}

fn descending_missing_last(a: &Option<f64>, b: &Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Regime, ranking and selection at index `i`. `None` while the regime is
/// not yet defined or when no pool member has a price at `i`.
pub fn decide(
    panel: &RotationPanel<'_>,
    signal: &RegimeSignal,
    i: usize,
    top_k: usize,
) -> Option<RotationDecision> {
    let decision_date = *panel.dates().get(i)?;
    let regime = signal.regime_at(i)?;

    let mut ranking: Vec<RankedInstrument> = panel
        .pools()
        .pool(regime)
        .iter()
        .filter(|id| panel.price(id, i).is_some())
        .map(|id| RankedInstrument {
            id: id.clone(),
            trailing_return: match i.checked_sub(1) {
                None => Some(0.0),
                Some(prev) => panel.period_return(id, prev, i),
            },
        })
        .collect();

    if ranking.is_empty() {
        return None;
    }
    ranking.sort_by(|a, b| descending_missing_last(&a.trailing_return, &b.trailing_return));

    let selected = ranking.iter().take(top_k).map(|r| r.id.clone()).collect();
    Some(RotationDecision {
        decision_date,
        index: i,
        regime,
        selected,
        ranking,
    })
}

/// Realized equal-weight return of a decision over `[i, i+1]`.
pub fn measure(panel: &RotationPanel<'_>, decision: RotationDecision) -> Option<BacktestRecord> {
    let i = decision.index;
    let period_end = *panel.dates().get(i + 1)?;

    let benchmark_return = simple_return(panel.benchmark_price(i)?, panel.benchmark_price(i + 1)?)?;

    let returns: Vec<f64> = decision
        .selected
        .iter()
        .filter_map(|id| panel.period_return(id, i, i + 1))
        .collect();
    if returns.is_empty() {
        return None;
    }
    let strategy_return = returns.iter().sum::<f64>() / returns.len() as f64;

    Some(BacktestRecord {
        period_start: decision.decision_date,
        period_end,
        regime: decision.regime,
        selected: decision.selected,
        ranking: decision.ranking,
        strategy_return,
        benchmark_return,
        alpha: strategy_return - benchmark_return,
    })
}

pub fn run_rotation_backtest(
    panel: &RotationPanel<'_>,
    signal: &RegimeSignal,
    config: &RotationConfig,
) -> BacktestLedger {
    let n = panel.len();
    if n < config.min_periods() {
        debug!(
            periods = n,
            required = config.min_periods(),
            "panel too short for a rebalance step"
        );
        return BacktestLedger::default();
    }

    debug!(first = ?signal.first_actionable(), periods = n, "regime signal ready");
    let mut records = Vec::new();
    for i in 0..n - 1 {
        let Some(decision) = decide(panel, signal, i, config.top_k) else {
            debug!(index = i, "no rotation decision");
            continue;
        };
        match measure(panel, decision) {
            Some(record) => records.push(record),
            None => debug!(index = i, "forward return unavailable, step skipped"),
        }
    }

    BacktestLedger { records }
}
