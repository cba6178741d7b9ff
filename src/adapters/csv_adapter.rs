//! CSV file price adapter: one `<ID>.csv` per instrument with `date,close`.

use crate::domain::error::RotatorError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::ports::data_port::PricePort;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, id: &str) -> PathBuf {
        self.base_path.join(format!("{id}.csv"))
    }

    /// `Ok(None)` when the instrument has no file.
    pub fn read_series(
        &self,
        id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Option<PriceSeries>, RotatorError> {
        let path = self.csv_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| RotatorError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| RotatorError::Data {
                reason: format!("{}: CSV header error: {}", path.display(), e),
            })?
            .clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| RotatorError::Data {
                    reason: format!("{}: missing {} column", path.display(), name),
                })
        };
        let date_col = column("date")?;
        let close_col = column("close")?;

        let mut points = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| RotatorError::Data {
                reason: format!("{}: CSV parse error: {}", path.display(), e),
            })?;

            let date_str = record.get(date_col).unwrap_or("").trim();
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                RotatorError::Data {
                    reason: format!("{}: invalid date '{}': {}", path.display(), date_str, e),
                }
            })?;
            if date < start_date || date > end_date {
                continue;
            }

            // blank close = market closed that day
            let close_str = record.get(close_col).unwrap_or("").trim();
            if close_str.is_empty() {
                continue;
            }
            let price: f64 = close_str.parse().map_err(|e| RotatorError::Data {
                reason: format!("{}: invalid close value '{}': {}", path.display(), close_str, e),
            })?;

            points.push(PricePoint { date, price });
        }

        Ok(Some(PriceSeries::new(id, points)))
    }
}

impl PricePort for CsvAdapter {
    fn fetch(
        &self,
        ids: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<HashMap<String, PriceSeries>, RotatorError> {
        let mut out = HashMap::new();
        for id in ids {
            match self.read_series(id, start_date, end_date)? {
                Some(series) if !series.is_empty() => {
                    debug!(id = %id, points = series.len(), "loaded prices");
                    out.insert(id.clone(), series);
                }
                Some(_) => warn!(id = %id, "no prices in requested window"),
                None => warn!(id = %id, path = %self.csv_path(id).display(), "no price file"),
            }
        }
        Ok(out)
    }
}
