//! Simple moving average over a trailing window.
//!
//! SMA(n)[i] = mean(X[i-n+1..=i]). A window containing any invalid input is
//! itself invalid; the first (n-1) points are warmup.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn calculate_sma(points: &[IndicatorPoint], period: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(points.len());

    for i in 0..points.len() {
        let date = points[i].date;
        let value = if period > 0 && i + 1 >= period {
            let window = &points[i + 1 - period..=i];
            window
                .iter()
                .map(IndicatorPoint::get)
                .collect::<Option<Vec<f64>>>()
                .and_then(|w| mean(&w))
        } else {
            None
        };
        values.push(IndicatorPoint::new(date, value));
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values,
    }
}
