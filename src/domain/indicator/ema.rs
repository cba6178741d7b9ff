//! Exponential smoothing by span.
//!
//! alpha = 2/(span+1), seeded with the first valid value, then
//! EMA[i] = EMA[i-1] + alpha*(X[i] - EMA[i-1]).
//! Invalid inputs produce invalid outputs and leave the state untouched, so
//! a gap never resets or poisons the smoothing.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};

pub fn calculate_ema(points: &[IndicatorPoint], span: usize) -> IndicatorSeries {
    let span = span.max(1);
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut state: Option<f64> = None;
    let mut values = Vec::with_capacity(points.len());

    for point in points {
        match point.get() {
            Some(x) => {
                // prev + alpha*(x - prev) keeps a constant input exactly constant
                let ema = match state {
                    None => x,
                    Some(prev) => prev + alpha * (x - prev),
                };
                state = Some(ema);
                values.push(IndicatorPoint::new(point.date, Some(ema)));
            }
            None => values.push(IndicatorPoint::invalid(point.date)),
        }
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Ema(span),
        values,
    }
}
