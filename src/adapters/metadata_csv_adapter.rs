//! Instrument metadata from a CSV file with `id,name,sector,region,pool`.

use crate::domain::error::RotatorError;
use crate::domain::universe::{parse_pool, InstrumentMeta};
use crate::ports::metadata_port::MetadataPort;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

pub struct MetadataCsvAdapter {
    path: PathBuf,
}

impl MetadataCsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn data_error(&self, reason: impl std::fmt::Display) -> RotatorError {
        RotatorError::Data {
            reason: format!("{}: {}", self.path.display(), reason),
        }
    }
}

impl MetadataPort for MetadataCsvAdapter {
    fn instruments(&self) -> Result<Vec<InstrumentMeta>, RotatorError> {
        let content = fs::read_to_string(&self.path)?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());

        let headers = rdr.headers().map_err(|e| self.data_error(e))?.clone();
        let column = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));
        let id_col = column("id").ok_or_else(|| self.data_error("missing id column"))?;
        let name_col = column("name");
        let sector_col = column("sector");
        let region_col = column("region");
        let pool_col = column("pool");

        let mut seen = HashSet::new();
        let mut instruments = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| self.data_error(e))?;
            let field = |col: Option<usize>| {
                col.and_then(|c| record.get(c))
                    .map(|v| v.trim().to_string())
                    .unwrap_or_default()
            };

            let id = field(Some(id_col));
            if id.is_empty() {
                return Err(self.data_error("empty instrument id"));
            }
            if !seen.insert(id.clone()) {
                return Err(self.data_error(format!("duplicate instrument {id}")));
            }
            let pool = parse_pool(&id, &field(pool_col)).map_err(|e| self.data_error(e))?;

            instruments.push(InstrumentMeta {
                name: field(name_col),
                sector: field(sector_col),
                region: field(region_col),
                pool,
                id,
            });
        }

        Ok(instruments)
    }
}
