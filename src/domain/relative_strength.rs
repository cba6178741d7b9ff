//! Relative strength: smoothed instrument/benchmark price ratio.
//!
//! RS(t) = EMA(price_instrument(t) / price_benchmark(t) * 100, span)
//!
//! A zero or missing benchmark price makes the ratio at `t` invalid; it never
//! becomes infinity. The series starts at the first date both prices exist.

use crate::domain::error::RotatorError;
use crate::domain::indicator::ema::calculate_ema;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries};
use crate::domain::store::TimeSeriesStore;
use chrono::NaiveDate;

pub const RATIO_SCALE: f64 = 100.0;

fn ratio(instrument: Option<f64>, benchmark: Option<f64>) -> Option<f64> {
    match (instrument, benchmark) {
        (Some(p), Some(b)) if b != 0.0 => Some(p / b * RATIO_SCALE),
        _ => None,
    }
}

/// Raw ratio points on the shared calendar, trimmed to start at the first
/// overlapping date. Empty when the two series never overlap.
pub fn ratio_points(
    dates: &[NaiveDate],
    instrument: &[Option<f64>],
    benchmark: &[Option<f64>],
) -> Vec<IndicatorPoint> {
    let points: Vec<IndicatorPoint> = dates
        .iter()
        .zip(instrument.iter().zip(benchmark.iter()))
        .map(|(&date, (&p, &b))| IndicatorPoint::new(date, ratio(p, b)))
        .collect();

    match points.iter().position(|p| p.valid) {
        Some(start) => points[start..].to_vec(),
        None => Vec::new(),
    }
}

/// Smoothed RS series for two aligned price vectors.
///
/// Returns `None` when the inputs share no date with both prices present.
pub fn calculate_relative_strength(
    dates: &[NaiveDate],
    instrument: &[Option<f64>],
    benchmark: &[Option<f64>],
    span: usize,
) -> Option<IndicatorSeries> {
    let raw = ratio_points(dates, instrument, benchmark);
    if raw.is_empty() {
        return None;
    }
    Some(calculate_ema(&raw, span))
}

/// RS series of `id` against the store benchmark.
///
/// The two series must have been observed over intersecting date ranges;
/// a benchmark that stopped before the instrument started is not carried
/// forward into a ratio.
pub fn relative_strength(
    store: &TimeSeriesStore,
    id: &str,
    span: usize,
) -> Result<IndicatorSeries, RotatorError> {
    let instrument = store
        .aligned(id)
        .ok_or_else(|| RotatorError::NoData { id: id.to_string() })?;
    let no_overlap = || RotatorError::InsufficientOverlap {
        instrument: id.to_string(),
        benchmark: store.benchmark_id().to_string(),
    };

    if !store.observed_overlap(id, store.benchmark_id()) {
        return Err(no_overlap());
    }
    calculate_relative_strength(store.calendar(), instrument, store.benchmark_aligned(), span)
        .ok_or_else(no_overlap)
}
