//! In-process TTL cache and the price port wrapper that uses it.

use crate::domain::error::RotatorError;
use crate::domain::price_series::PriceSeries;
use crate::ports::cache_port::{PriceCache, PriceMap};
use crate::ports::data_port::PricePort;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Default)]
pub struct MemoryPriceCache {
    entries: Mutex<HashMap<String, (Instant, PriceMap)>>,
}

impl MemoryPriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, (Instant, PriceMap)>> {
        // entries stay consistent even if a holder panicked
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl PriceCache for MemoryPriceCache {
    fn get_or_fetch(
        &self,
        key: &str,
        ttl: Duration,
        compute: &dyn Fn() -> Result<PriceMap, RotatorError>,
    ) -> Result<PriceMap, RotatorError> {
        if let Some((stored, value)) = self.lock().get(key) {
            if stored.elapsed() < ttl {
                debug!(key, "price cache hit");
                return Ok(value.clone());
            }
        }

        debug!(key, "price cache miss");
        let value = compute()?;
        self.lock().insert(key.to_string(), (Instant::now(), value.clone()));
        Ok(value)
    }

    fn invalidate(&self, key: &str) {
        self.lock().remove(key);
    }
}

/// Price port that memoizes fetches of another port.
pub struct CachedPricePort<'a> {
    inner: &'a dyn PricePort,
    cache: &'a dyn PriceCache,
    ttl: Duration,
}

impl<'a> CachedPricePort<'a> {
    pub fn new(inner: &'a dyn PricePort, cache: &'a dyn PriceCache, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    /// Format: `prices:{ids}:{start}:{end}`
    fn cache_key(ids: &[String], start_date: NaiveDate, end_date: NaiveDate) -> String {
        format!("prices:{}:{}:{}", ids.join(","), start_date, end_date)
    }
}

impl PricePort for CachedPricePort<'_> {
    fn fetch(
        &self,
        ids: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<HashMap<String, PriceSeries>, RotatorError> {
        let key = Self::cache_key(ids, start_date, end_date);
        self.cache.get_or_fetch(&key, self.ttl, &|| {
            self.inner.fetch(ids, start_date, end_date)
        })
    }
}
