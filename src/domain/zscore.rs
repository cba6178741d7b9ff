//! Z-score normalization of a relative-strength series into RRG coordinates.
//!
//! trend_strength = (RS_last - mean(RS, trend_window)) / sd(RS, trend_window) * scale
//! momentum       = (RS_last - mean(RS, momentum_window)) / sd(RS, momentum_window) * scale
//!
//! `sd` is the sample standard deviation with a floor of 1 when it is exactly
//! zero. A snapshot `periods_back` periods in the past is computed on the
//! series cut at that point, so it never sees later data.

use crate::domain::indicator::sma::mean;
use crate::domain::indicator::stddev::stddev_with_floor;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries};
use crate::domain::rrg::{CoordinateHistory, CoordinateSample, RrgCoordinate};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizerConfig {
    pub trend_window: usize,
    pub momentum_window: usize,
    pub scale_factor: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            trend_window: 26,
            momentum_window: 4,
            scale_factor: 10.0,
        }
    }
}

impl NormalizerConfig {
    /// Observations needed for a snapshot `periods_back` periods ago.
    pub fn required_observations(&self, periods_back: usize) -> usize {
        self.trend_window + periods_back + 2
    }
}

fn trailing_window(points: &[IndicatorPoint], window: usize) -> Option<Vec<f64>> {
    if window == 0 || points.len() < window {
        return None;
    }
    points[points.len() - window..]
        .iter()
        .map(IndicatorPoint::get)
        .collect()
}

fn zscore(last: f64, window: &[f64], scale: f64) -> Option<f64> {
    let m = mean(window)?;
    let sd = stddev_with_floor(window)?;
    let z = (last - m) / sd * scale;
    z.is_finite().then_some(z)
}

/// Coordinate of `rs` as of `periods_back` periods before its last point.
pub fn normalize(
    rs: &IndicatorSeries,
    config: &NormalizerConfig,
    periods_back: usize,
) -> CoordinateSample {
    if rs.len() < config.required_observations(periods_back) {
        return CoordinateSample::Invalid;
    }

    let cut = rs.truncated(periods_back);
    let Some(last) = cut.last().and_then(IndicatorPoint::get) else {
        return CoordinateSample::Invalid;
    };

    let trend = trailing_window(cut, config.trend_window)
        .and_then(|w| zscore(last, &w, config.scale_factor));
    let momentum = trailing_window(cut, config.momentum_window)
        .and_then(|w| zscore(last, &w, config.scale_factor));

    match (trend, momentum) {
        (Some(t), Some(m)) => RrgCoordinate::new(t, m).into(),
        _ => CoordinateSample::Invalid,
    }
}

/// `length` snapshots at offsets 0, step, 2*step, ... most recent first.
pub fn coordinate_history(
    rs: &IndicatorSeries,
    config: &NormalizerConfig,
    length: usize,
    step: usize,
) -> CoordinateHistory {
    let samples = (0..length)
        .map(|k| normalize(rs, config, k * step))
        .collect();
    CoordinateHistory::new(samples, step)
}
