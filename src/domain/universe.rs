//! Instrument universe: metadata, regime pools and data availability.
//!
//! Pool order is the order instruments appear in the metadata source; that
//! order is also the tie-break order when trailing returns are equal.

use crate::domain::price_series::PriceSeries;
use crate::domain::regime::Regime;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentMeta {
    pub id: String,
    pub name: String,
    pub sector: String,
    pub region: String,
    pub pool: Option<Regime>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolPartition {
    pub cyclical: Vec<String>,
    pub defensive: Vec<String>,
}

impl PoolPartition {
    pub fn from_metadata(instruments: &[InstrumentMeta]) -> Self {
        let mut pools = PoolPartition::default();
        for meta in instruments {
            match meta.pool {
                Some(Regime::Cyclical) => pools.cyclical.push(meta.id.clone()),
                Some(Regime::Defensive) => pools.defensive.push(meta.id.clone()),
                None => {}
            }
        }
        pools
    }

    pub fn pool(&self, regime: Regime) -> &[String] {
        match regime {
            Regime::Cyclical => &self.cyclical,
            Regime::Defensive => &self.defensive,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cyclical.is_empty() && self.defensive.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Universe {
    pub instruments: Vec<InstrumentMeta>,
    pub benchmark: String,
    pub driver_a: String,
    pub driver_b: String,
}

impl Universe {
    pub fn count(&self) -> usize {
        self.instruments.len()
    }

    /// Instrument by id, ignoring ASCII case like code lists do.
    pub fn get(&self, id: &str) -> Option<&InstrumentMeta> {
        self.instruments.iter().find(|m| m.id.eq_ignore_ascii_case(id))
    }

    pub fn instrument_ids(&self) -> Vec<String> {
        self.instruments.iter().map(|m| m.id.clone()).collect()
    }

    /// Every id to fetch: instruments, benchmark and both drivers.
    pub fn fetch_ids(&self) -> Vec<String> {
        let mut ids = self.instrument_ids();
        for extra in [&self.benchmark, &self.driver_a, &self.driver_b] {
            if !ids.contains(extra) {
                ids.push(extra.clone());
            }
        }
        ids
    }

    pub fn pools(&self) -> PoolPartition {
        PoolPartition::from_metadata(&self.instruments)
    }

    /// Keeps only the listed ids, preserving metadata order and spelling.
    pub fn restricted_to(&self, ids: &[String]) -> Universe {
        Universe {
            instruments: self
                .instruments
                .iter()
                .filter(|m| ids.iter().any(|code| m.id.eq_ignore_ascii_case(code)))
                .cloned()
                .collect(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in code list")]
    EmptyToken,

    #[error("duplicate code: {0}")]
    DuplicateCode(String),

    #[error("unknown pool '{pool}' for {id}")]
    UnknownPool { id: String, pool: String },
}

pub fn parse_codes(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut codes = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let code = trimmed.to_uppercase();
        if !seen.insert(code.clone()) {
            return Err(UniverseError::DuplicateCode(code));
        }
        codes.push(code);
    }

    Ok(codes)
}

/// Blank means "not in any pool".
pub fn parse_pool(id: &str, value: &str) -> Result<Option<Regime>, UniverseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<Regime>()
        .map(Some)
        .map_err(|_| UniverseError::UnknownPool {
            id: id.to_string(),
            pool: trimmed.to_string(),
        })
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedCode {
    pub code: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NoData,
    InsufficientBars { bars: usize },
}

#[derive(Debug, Clone)]
pub struct AvailabilityReport {
    pub available: Vec<String>,
    pub skipped: Vec<SkippedCode>,
}

/// Splits requested ids into those with at least `minimum` observations and
/// those skipped. Never fails: partial coverage is the normal case.
pub fn check_availability(
    fetched: &HashMap<String, PriceSeries>,
    ids: &[String],
    minimum: usize,
) -> AvailabilityReport {
    let mut available = Vec::new();
    let mut skipped = Vec::new();

    for code in ids {
        match fetched.get(code) {
            None => {
                warn!(code = %code, "skipping instrument: no data returned");
                skipped.push(SkippedCode {
                    code: code.clone(),
                    reason: SkipReason::NoData,
                });
            }
            Some(series) if series.is_empty() => {
                warn!(code = %code, "skipping instrument: empty series");
                skipped.push(SkippedCode {
                    code: code.clone(),
                    reason: SkipReason::NoData,
                });
            }
            Some(series) if series.len() < minimum => {
                warn!(
                    code = %code,
                    bars = series.len(),
                    minimum,
                    "instrument has short history"
                );
                skipped.push(SkippedCode {
                    code: code.clone(),
                    reason: SkipReason::InsufficientBars { bars: series.len() },
                });
            }
            Some(series) => {
                info!(code = %code, bars = series.len(), "instrument ok");
                available.push(code.clone());
            }
        }
    }

    AvailabilityReport { available, skipped }
}
