#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use rotator::domain::error::RotatorError;
use rotator::domain::price_series::PriceSeries;
use rotator::domain::regime::Regime;
use rotator::domain::universe::InstrumentMeta;
use rotator::ports::data_port::PricePort;
use rotator::ports::metadata_port::MetadataPort;
use std::cell::Cell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub struct MockPricePort {
    pub data: HashMap<String, PriceSeries>,
    pub error: Option<String>,
    pub calls: Cell<usize>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            error: None,
            calls: Cell::new(0),
        }
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.data.insert(series.id.clone(), series);
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl PricePort for MockPricePort {
    fn fetch(
        &self,
        ids: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<HashMap<String, PriceSeries>, RotatorError> {
        self.calls.set(self.calls.get() + 1);
        if let Some(reason) = &self.error {
            return Err(RotatorError::Data {
                reason: reason.clone(),
            });
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.data.get(id))
            .map(|s| {
                let pairs: Vec<_> = s
                    .points()
                    .iter()
                    .filter(|p| p.date >= start_date && p.date <= end_date)
                    .map(|p| (p.date, p.price))
                    .collect();
                (s.id.to_string(), PriceSeries::from_pairs(s.id.clone(), &pairs))
            })
            .collect())
    }
}

pub struct MockMetadataPort {
    pub instruments: Vec<InstrumentMeta>,
}

impl MockMetadataPort {
    pub fn new(instruments: Vec<InstrumentMeta>) -> Self {
        Self { instruments }
    }
}

impl MetadataPort for MockMetadataPort {
    fn instruments(&self) -> Result<Vec<InstrumentMeta>, RotatorError> {
        Ok(self.instruments.clone())
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn meta(id: &str, pool: Option<Regime>) -> InstrumentMeta {
    InstrumentMeta {
        id: id.to_string(),
        name: format!("{id} fund"),
        sector: "Equity".to_string(),
        region: "World".to_string(),
        pool,
    }
}

/// One price per calendar day starting at `start`.
pub fn daily_series(id: &str, start: &str, n: usize, price: impl Fn(usize) -> f64) -> PriceSeries {
    let start = date(start);
    let pairs: Vec<_> = (0..n)
        .map(|i| (start + Duration::days(i as i64), price(i)))
        .collect();
    PriceSeries::from_pairs(id, &pairs)
}

pub fn flat_series(id: &str, start: &str, n: usize, price: f64) -> PriceSeries {
    daily_series(id, start, n, |_| price)
}

/// Writes `<dir>/<id>.csv` in the layout the CSV price adapter reads.
pub fn write_price_csv(dir: &Path, series: &PriceSeries) {
    let mut content = String::from("Date,Open,High,Low,Close,Volume\n");
    for p in series.points() {
        content.push_str(&format!(
            "{},{c},{c},{c},{c},1000\n",
            p.date,
            c = p.price
        ));
    }
    fs::write(dir.join(format!("{}.csv", series.id)), content).unwrap();
}

pub fn write_metadata_csv(path: &Path, instruments: &[InstrumentMeta]) {
    let mut content = String::from("id,name,sector,region,pool\n");
    for m in instruments {
        let pool = m.pool.map(|p| p.to_string()).unwrap_or_default();
        content.push_str(&format!(
            "{},{},{},{},{}\n",
            m.id, m.name, m.sector, m.region, pool
        ));
    }
    fs::write(path, content).unwrap();
}
