//! Price observations for a single instrument.
//!
//! A `PriceSeries` is strictly increasing in date. Gaps are resolved by
//! carrying the last known price forward; nothing is interpolated and nothing
//! before the first observation is ever filled in.

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub id: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from unordered observations.
    ///
    /// Non-finite prices are dropped. When a date appears more than once the
    /// last observation supplied wins.
    pub fn new(id: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.retain(|p| p.price.is_finite());
        // stable: later duplicates stay after earlier ones
        points.sort_by_key(|p| p.date);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }

        Self {
            id: id.into(),
            points: deduped,
        }
    }

    pub fn from_pairs(id: impl Into<String>, pairs: &[(NaiveDate, f64)]) -> Self {
        let points = pairs
            .iter()
            .map(|&(date, price)| PricePoint { date, price })
            .collect();
        Self::new(id, points)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Last observed price on or before `date`.
    pub fn price_at(&self, date: NaiveDate) -> Option<f64> {
        let idx = self.points.partition_point(|p| p.date <= date);
        if idx == 0 {
            None
        } else {
            Some(self.points[idx - 1].price)
        }
    }

    /// Projects the series onto an ascending calendar with forward fill.
    ///
    /// Calendar dates before the first observation stay `None`.
    pub fn aligned_to(&self, calendar: &[NaiveDate]) -> Vec<Option<f64>> {
        let mut out = Vec::with_capacity(calendar.len());
        let mut cursor = 0;
        let mut last: Option<f64> = None;

        for &day in calendar {
            while cursor < self.points.len() && self.points[cursor].date <= day {
                last = Some(self.points[cursor].price);
                cursor += 1;
            }
            out.push(last);
        }
        out
    }
}
