//! Per-instrument RRG analysis of a universe.
//!
//! Every requested instrument yields a snapshot; fields that cannot be
//! computed for lack of history stay `None` so partial results survive.

use crate::domain::error::RotatorError;
use crate::domain::indicator::IndicatorSeries;
use crate::domain::quadrant::Quadrant;
use crate::domain::relative_strength::relative_strength;
use crate::domain::scorer::{MultiHorizonScorer, ScorerConfig};
use crate::domain::store::{Frequency, TimeSeriesStore};
use crate::domain::universe::InstrumentMeta;
use crate::domain::zscore::{coordinate_history, NormalizerConfig};
use chrono::Months;
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct RrgConfig {
    pub frequency: Frequency,
    pub smoothing_span: usize,
    pub normalizer: NormalizerConfig,
    pub history_step: usize,
    pub scorer: ScorerConfig,
}

impl Default for RrgConfig {
    fn default() -> Self {
        Self {
            frequency: Frequency::Weekly,
            smoothing_span: 10,
            normalizer: NormalizerConfig::default(),
            history_step: 1,
            scorer: ScorerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentSnapshot {
    pub id: String,
    pub name: String,
    pub sector: String,
    pub score: Option<f64>,
    pub quadrant: Option<Quadrant>,
    pub trend_strength: Option<f64>,
    pub momentum: Option<f64>,
    pub daily_return: Option<f64>,
    pub three_month_return: Option<f64>,
}

impl InstrumentSnapshot {
    fn empty(meta: &InstrumentMeta) -> Self {
        Self {
            id: meta.id.clone(),
            name: meta.name.clone(),
            sector: meta.sector.clone(),
            score: None,
            quadrant: None,
            trend_strength: None,
            momentum: None,
            daily_return: None,
            three_month_return: None,
        }
    }
}

fn simple_return(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        return None;
    }
    Some(to / from - 1.0).filter(|r| r.is_finite())
}

/// Return over the last two calendar days of the daily store.
pub fn daily_return(daily: &TimeSeriesStore, id: &str) -> Option<f64> {
    let last = *daily.calendar().last()?;
    let window = daily.window_ending(id, last, 2)?;
    simple_return(window[0], window[1])
}

/// Return from the price as of three months before the last calendar date.
pub fn three_month_return(daily: &TimeSeriesStore, id: &str) -> Option<f64> {
    let last = *daily.calendar().last()?;
    let earlier = last.checked_sub_months(Months::new(3))?;
    simple_return(daily.price_at(id, earlier)?, daily.price_at(id, last)?)
}

/// RS series of `id`, rejected when it is too short for even the latest
/// coordinate.
pub fn scorable_relative_strength(
    rrg_store: &TimeSeriesStore,
    id: &str,
    config: &RrgConfig,
) -> Result<IndicatorSeries, RotatorError> {
    let rs = relative_strength(rrg_store, id, config.smoothing_span)?;
    let need = config.normalizer.required_observations(0);
    if rs.len() < need {
        return Err(RotatorError::InsufficientData {
            id: id.to_string(),
            have: rs.len(),
            need,
        });
    }
    Ok(rs)
}

pub fn analyze_instrument(
    daily: &TimeSeriesStore,
    rrg_store: &TimeSeriesStore,
    meta: &InstrumentMeta,
    config: &RrgConfig,
    scorer: &MultiHorizonScorer,
) -> InstrumentSnapshot {
    let mut snapshot = InstrumentSnapshot {
        daily_return: daily_return(daily, &meta.id),
        three_month_return: three_month_return(daily, &meta.id),
        ..InstrumentSnapshot::empty(meta)
    };

    let rs = match scorable_relative_strength(rrg_store, &meta.id, config) {
        Ok(rs) => rs,
        Err(RotatorError::NoData { .. }) => {
            warn!(id = %meta.id, "no price data, instrument not scored");
            return snapshot;
        }
        Err(e @ RotatorError::InsufficientData { .. }) => {
            debug!(error = %e, "instrument not scored");
            return snapshot;
        }
        Err(e) => {
            warn!(id = %meta.id, error = %e, "instrument not scored");
            return snapshot;
        }
    };

    let history = coordinate_history(
        &rs,
        &config.normalizer,
        scorer.config().history_length(),
        config.history_step,
    );
    // coordinates and quadrant describe the same sample
    if let Some(latest) = history.latest_valid() {
        snapshot.trend_strength = Some(latest.trend_strength);
        snapshot.momentum = Some(latest.momentum);
        snapshot.quadrant = Some(latest.quadrant());
    }
    match scorer.score(&history) {
        Some(card) => snapshot.score = Some(card.score),
        None => debug!(
            id = %meta.id,
            observations = rs.len(),
            valid = rs.valid_count(),
            required = config.normalizer.required_observations(0),
            "insufficient history for a score"
        ),
    }
    snapshot
}

/// Analyzes every instrument in parallel; output keeps input order.
pub fn analyze_universe(
    daily: &TimeSeriesStore,
    instruments: &[InstrumentMeta],
    config: &RrgConfig,
) -> Vec<InstrumentSnapshot> {
    let rrg_store = daily.resample(config.frequency);
    let scorer = MultiHorizonScorer::new(config.scorer.clone());

    instruments
        .par_iter()
        .map(|meta| analyze_instrument(daily, &rrg_store, meta, config, &scorer))
        .collect()
}

/// Sorts by score, highest first; unscored instruments go last.
pub fn rank_snapshots(snapshots: &mut [InstrumentSnapshot]) {
    snapshots.sort_by(|a, b| match (a.score, b.score) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
