//! Sample standard deviation (ddof = 1) over a window.
//!
//! STDDEV(n) = sqrt(sum((X[j] - mean)^2) / (n - 1))
//!
//! `stddev_with_floor` substitutes 1.0 when the deviation is exactly zero, so a
//! perfectly flat window yields the raw deviation from the mean (which is
//! itself zero) instead of a division by zero.

use crate::domain::indicator::sma::mean;

pub const STDDEV_FLOOR: f64 = 1.0;

pub fn sample_stddev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (values.len() as f64 - 1.0);
    Some(variance.sqrt())
}

pub fn stddev_with_floor(values: &[f64]) -> Option<f64> {
    sample_stddev(values).map(|sd| if sd == 0.0 { STDDEV_FLOOR } else { sd })
}
