//! TimeSeriesStore: aligned price panel for one universe and its benchmark.
//!
//! All instruments are projected onto a unified calendar (the union of every
//! observed date) with forward fill. The store is built once per refresh and
//! only read afterwards.

use crate::domain::error::RotatorError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use chrono::{Datelike, Days, Months, NaiveDate};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    /// Weeks ending Sunday.
    Weekly,
    /// Calendar months, labelled by the last day of the month.
    Monthly,
}

impl Frequency {
    /// Label of the period containing `date`.
    pub fn period_end(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => Some(date),
            Frequency::Weekly => {
                let offset = (7 - date.weekday().num_days_from_sunday()) % 7;
                date.checked_add_days(Days::new(u64::from(offset)))
            }
            Frequency::Monthly => date
                .with_day(1)
                .and_then(|first| first.checked_add_months(Months::new(1)))
                .and_then(|next| next.pred_opt()),
        }
    }

    fn next_period_end(self, boundary: NaiveDate) -> Option<NaiveDate> {
        boundary
            .succ_opt()
            .and_then(|next| self.period_end(next))
    }

    /// Period-end labels covering `[first, last]`.
    pub fn boundaries(self, first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
        let mut out = Vec::new();
        let Some(end) = self.period_end(last) else {
            return out;
        };
        let mut current = self.period_end(first);
        while let Some(boundary) = current {
            if boundary > end {
                break;
            }
            out.push(boundary);
            current = self.next_period_end(boundary);
        }
        out
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "d" => Ok(Frequency::Daily),
            "weekly" | "w" => Ok(Frequency::Weekly),
            "monthly" | "m" => Ok(Frequency::Monthly),
            other => Err(format!("unknown frequency '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TimeSeriesStore {
    benchmark_id: String,
    calendar: Vec<NaiveDate>,
    series: HashMap<String, PriceSeries>,
    aligned: HashMap<String, Vec<Option<f64>>>,
}

impl TimeSeriesStore {
    /// Builds the store. The benchmark is stored alongside the instruments
    /// under its own id.
    pub fn new(benchmark: PriceSeries, instruments: Vec<PriceSeries>) -> Self {
        let benchmark_id = benchmark.id.clone();
        let mut series: HashMap<String, PriceSeries> = instruments
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();
        series.insert(benchmark_id.clone(), benchmark);

        let calendar = build_unified_calendar(series.values());
        let aligned = series
            .iter()
            .map(|(id, s)| (id.clone(), s.aligned_to(&calendar)))
            .collect();

        Self {
            benchmark_id,
            calendar,
            series,
            aligned,
        }
    }

    /// Builds the store from a fetch result. A missing or empty benchmark is
    /// the only structural failure; missing instruments are simply absent.
    pub fn from_map(
        benchmark_id: &str,
        mut fetched: HashMap<String, PriceSeries>,
    ) -> Result<Self, RotatorError> {
        let benchmark = fetched
            .remove(benchmark_id)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RotatorError::NoData {
                id: benchmark_id.to_string(),
            })?;
        Ok(Self::new(benchmark, fetched.into_values().collect()))
    }

    pub fn benchmark_id(&self) -> &str {
        &self.benchmark_id
    }

    pub fn calendar(&self) -> &[NaiveDate] {
        &self.calendar
    }

    pub fn len(&self) -> usize {
        self.calendar.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calendar.is_empty()
    }

    /// Forward-filled prices on the store calendar.
    pub fn aligned(&self, id: &str) -> Option<&[Option<f64>]> {
        self.aligned.get(id).map(Vec::as_slice)
    }

    pub fn benchmark_aligned(&self) -> &[Option<f64>] {
        self.aligned(&self.benchmark_id).unwrap_or(&[])
    }

    /// Index of the last calendar date on or before `date`.
    pub fn index_as_of(&self, date: NaiveDate) -> Option<usize> {
        let idx = self.calendar.partition_point(|d| *d <= date);
        idx.checked_sub(1)
    }

    /// Whether the observed date ranges of `a` and `b` intersect. Forward
    /// fill never counts as an observation here.
    pub fn observed_overlap(&self, a: &str, b: &str) -> bool {
        let range = |id: &str| {
            let s = self.series.get(id)?;
            Some((s.first_date()?, s.last_date()?))
        };
        match (range(a), range(b)) {
            (Some((a_first, a_last)), Some((b_first, b_last))) => {
                a_first <= b_last && b_first <= a_last
            }
            _ => false,
        }
    }

    /// Last known price on or before `date`; `None` when not available.
    pub fn price_at(&self, id: &str, date: NaiveDate) -> Option<f64> {
        self.series.get(id).and_then(|s| s.price_at(date))
    }

    /// The `length` most recent prices ending at `date`, most recent last.
    ///
    /// Returns `None` instead of a shorter slice when the history does not
    /// cover the full window.
    pub fn window_ending(&self, id: &str, date: NaiveDate, length: usize) -> Option<Vec<f64>> {
        let aligned = self.aligned.get(id)?;
        let end = self.index_as_of(date)?;
        if end + 1 < length {
            return None;
        }
        aligned[end + 1 - length..=end].iter().copied().collect()
    }

    /// Derived store keyed by period-end dates, each value being the last
    /// observation on or before that period's boundary.
    ///
    /// A series contributes no point past the period of its own last
    /// observation; the aligned view still forward-fills it.
    pub fn resample(&self, frequency: Frequency) -> TimeSeriesStore {
        let boundaries = match (self.calendar.first(), self.calendar.last()) {
            (Some(&first), Some(&last)) => frequency.boundaries(first, last),
            _ => Vec::new(),
        };

        let resample_one = |series: &PriceSeries| {
            let last_period = series
                .last_date()
                .and_then(|last| frequency.period_end(last));
            let points = boundaries
                .iter()
                .take_while(|&&date| last_period.is_some_and(|end| date <= end))
                .filter_map(|&date| series.price_at(date).map(|price| PricePoint { date, price }))
                .collect();
            PriceSeries::new(series.id.clone(), points)
        };

        let benchmark = self
            .series
            .get(&self.benchmark_id)
            .map(resample_one)
            .unwrap_or_else(|| PriceSeries::new(self.benchmark_id.clone(), Vec::new()));
        let instruments = self
            .series
            .iter()
            .filter(|(id, _)| **id != self.benchmark_id)
            .map(|(_, s)| resample_one(s))
            .collect();

        TimeSeriesStore::new(benchmark, instruments)
    }
}

pub fn build_unified_calendar<'a>(series: impl Iterator<Item = &'a PriceSeries>) -> Vec<NaiveDate> {
    let unique: BTreeSet<NaiveDate> = series
        .flat_map(|s| s.points().iter().map(|p| p.date))
        .collect();
    unique.into_iter().collect()
}
