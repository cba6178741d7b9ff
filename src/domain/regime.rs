//! Binary market regime from a driver ratio against its moving average.
//!
//! ratio = driver_a / driver_b. The regime is Cyclical while the ratio is
//! strictly above its trailing mean, Defensive otherwise. Where the mean is not
//! yet defined there is no regime at all (warm-up), never a default one.

use crate::domain::error::RotatorError;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::indicator::IndicatorPoint;
use crate::domain::store::TimeSeriesStore;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    Cyclical,
    Defensive,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Cyclical => write!(f, "Cyclical"),
            Regime::Defensive => write!(f, "Defensive"),
        }
    }
}

impl FromStr for Regime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cyclical" => Ok(Regime::Cyclical),
            "defensive" => Ok(Regime::Defensive),
            other => Err(format!("unknown regime '{other}'")),
        }
    }
}

/// Series on which the driver moving average is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalBasis {
    /// Mean over rebalance periods of the resampled panel.
    #[default]
    Period,
    /// Mean over daily ratios, sampled as of each rebalance date.
    Daily,
}

impl fmt::Display for SignalBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalBasis::Period => write!(f, "period"),
            SignalBasis::Daily => write!(f, "daily"),
        }
    }
}

impl FromStr for SignalBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "period" => Ok(SignalBasis::Period),
            "daily" => Ok(SignalBasis::Daily),
            other => Err(format!("unknown ma basis '{other}'")),
        }
    }
}

pub fn driver_ratio(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) if b != 0.0 => Some(a / b).filter(|r| r.is_finite()),
        _ => None,
    }
}

/// Driver ratio and its moving average, aligned to the rebalance dates.
#[derive(Debug, Clone, PartialEq)]
pub struct RegimeSignal {
    pub ratio: Vec<Option<f64>>,
    pub average: Vec<Option<f64>>,
}

impl RegimeSignal {
    /// Rolling mean of `window` periods over the per-period ratio.
    pub fn from_periods(
        dates: &[NaiveDate],
        driver_a: &[Option<f64>],
        driver_b: &[Option<f64>],
        window: usize,
    ) -> Self {
        let points: Vec<IndicatorPoint> = dates
            .iter()
            .zip(driver_a.iter().zip(driver_b.iter()))
            .map(|(&date, (&a, &b))| IndicatorPoint::new(date, driver_ratio(a, b)))
            .collect();
        let sma = calculate_sma(&points, window);

        Self {
            ratio: points.iter().map(IndicatorPoint::get).collect(),
            average: sma.values.iter().map(IndicatorPoint::get).collect(),
        }
    }

    /// Rolling mean of `window` daily ratios (missing days dropped first),
    /// then both series sampled as of each date in `dates`.
    pub fn from_daily(
        daily: &TimeSeriesStore,
        driver_a: &str,
        driver_b: &str,
        window: usize,
        dates: &[NaiveDate],
    ) -> Result<Self, RotatorError> {
        let a = driver_prices(daily, driver_a)?;
        let b = driver_prices(daily, driver_b)?;

        let valid: Vec<IndicatorPoint> = daily
            .calendar()
            .iter()
            .zip(a.iter().zip(b.iter()))
            .filter_map(|(&date, (&a, &b))| {
                driver_ratio(a, b).map(|r| IndicatorPoint::new(date, Some(r)))
            })
            .collect();
        let sma = calculate_sma(&valid, window);

        let as_of = |points: &[IndicatorPoint], date: NaiveDate| {
            let idx = points.partition_point(|p| p.date <= date);
            idx.checked_sub(1).and_then(|i| points[i].get())
        };

        Ok(Self {
            ratio: dates.iter().map(|&d| as_of(&valid, d)).collect(),
            average: dates.iter().map(|&d| as_of(&sma.values, d)).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.ratio.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratio.is_empty()
    }

    /// Regime at period `i`; `None` while the average is undefined.
    pub fn regime_at(&self, i: usize) -> Option<Regime> {
        let ratio = self.ratio.get(i).copied().flatten()?;
        let average = self.average.get(i).copied().flatten()?;
        Some(if ratio > average {
            Regime::Cyclical
        } else {
            Regime::Defensive
        })
    }

    /// First index with a defined regime.
    pub fn first_actionable(&self) -> Option<usize> {
        (0..self.len()).find(|&i| self.regime_at(i).is_some())
    }
}

fn driver_prices<'a>(
    store: &'a TimeSeriesStore,
    id: &str,
) -> Result<&'a [Option<f64>], RotatorError> {
    store
        .aligned(id)
        .filter(|prices| prices.iter().any(Option::is_some))
        .ok_or_else(|| RotatorError::MissingDriver { id: id.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_series::PriceSeries;

    fn dates(n: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| start + chrono::Duration::days(i as i64))
            .collect()
    }

    #[test]
    fn warmup_has_no_regime() {
        let a = [Some(1.0), Some(2.0), Some(3.0), Some(1.0)];
        let b = [Some(1.0); 4];
        let signal = RegimeSignal::from_periods(&dates(4), &a, &b, 3);

        assert_eq!(signal.regime_at(0), None);
        assert_eq!(signal.regime_at(1), None);
        // ratio 3 > mean 2
        assert_eq!(signal.regime_at(2), Some(Regime::Cyclical));
        // ratio 1 < mean 2
        assert_eq!(signal.regime_at(3), Some(Regime::Defensive));
        assert_eq!(signal.first_actionable(), Some(2));
        assert_eq!(signal.regime_at(99), None);
    }

    #[test]
    fn equal_to_average_is_defensive() {
        let a = [Some(2.0); 3];
        let b = [Some(1.0); 3];
        let signal = RegimeSignal::from_periods(&dates(3), &a, &b, 2);
        assert_eq!(signal.regime_at(2), Some(Regime::Defensive));
    }

    #[test]
    fn zero_denominator_is_missing() {
        assert_eq!(driver_ratio(Some(1.0), Some(0.0)), None);
        assert_eq!(driver_ratio(None, Some(1.0)), None);
        assert_eq!(driver_ratio(Some(3.0), Some(2.0)), Some(1.5));
    }

    #[test]
    fn daily_basis_drops_gaps_then_samples_as_of() {
        let d = dates(6);
        let copper = PriceSeries::from_pairs(
            "HG=F",
            &[(d[0], 1.0), (d[1], 2.0), (d[3], 3.0), (d[4], 4.0), (d[5], 5.0)],
        );
        // gold has a zero print on day 2 which removes that ratio
        let gold = PriceSeries::from_pairs(
            "GC=F",
            &[(d[0], 1.0), (d[1], 1.0), (d[2], 0.0), (d[3], 1.0)],
        );
        let bench = PriceSeries::from_pairs("B", &d.iter().map(|&x| (x, 1.0)).collect::<Vec<_>>());
        let store = TimeSeriesStore::new(bench, vec![copper, gold]);

        let signal =
            RegimeSignal::from_daily(&store, "HG=F", "GC=F", 2, &[d[1], d[3], d[5]]).unwrap();
        // valid ratios: d0=1, d1=2, d3=3, d4=4, d5=5
        assert_eq!(signal.ratio, vec![Some(2.0), Some(3.0), Some(5.0)]);
        assert_eq!(signal.average, vec![Some(1.5), Some(2.5), Some(4.5)]);
        assert_eq!(signal.regime_at(0), Some(Regime::Cyclical));
    }

    #[test]
    fn daily_basis_requires_drivers() {
        let d = dates(2);
        let bench = PriceSeries::from_pairs("B", &[(d[0], 1.0), (d[1], 1.0)]);
        let store = TimeSeriesStore::new(bench, vec![]);
        let err = RegimeSignal::from_daily(&store, "HG=F", "GC=F", 2, &d).unwrap_err();
        assert!(matches!(err, RotatorError::MissingDriver { id } if id == "HG=F"));
    }

    #[test]
    fn parse_labels() {
        assert_eq!("Cyclical".parse::<Regime>(), Ok(Regime::Cyclical));
        assert!("growth".parse::<Regime>().is_err());
        assert_eq!("period".parse::<SignalBasis>(), Ok(SignalBasis::Period));
        assert_eq!(SignalBasis::default().to_string(), "period");
    }
}
