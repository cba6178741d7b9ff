//! Series transforms used by the RRG pipeline and the regime signal.
//!
//! - `IndicatorPoint`: one dated value with an explicit validity flag
//! - `IndicatorType`: identity + parameters of the series
//! - `IndicatorSeries`: a dated series of points
//!
//! Invalid points carry `value = 0.0` and must never be read as data.

pub mod ema;
pub mod sma;
pub mod stddev;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

impl IndicatorPoint {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Self {
                date,
                valid: true,
                value: v,
            },
            _ => Self::invalid(date),
        }
    }

    pub fn invalid(date: NaiveDate) -> Self {
        Self {
            date,
            valid: false,
            value: 0.0,
        }
    }

    pub fn get(&self) -> Option<f64> {
        self.valid.then_some(self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    /// Instrument / benchmark * 100.
    RelativeRatio,
    Ema(usize),
    Sma(usize),
    Stddev(usize),
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|p| p.valid).count()
    }

    /// Causal cut: drops the `periods_back` most recent points.
    pub fn truncated(&self, periods_back: usize) -> &[IndicatorPoint] {
        let keep = self.values.len().saturating_sub(periods_back);
        &self.values[..keep]
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::RelativeRatio => write!(f, "RS"),
            IndicatorType::Ema(span) => write!(f, "EMA({})", span),
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Stddev(period) => write!(f, "STDDEV({})", period),
        }
    }
}
