//! Get-or-compute cache port for fetched price maps.

use crate::domain::error::RotatorError;
use crate::domain::price_series::PriceSeries;
use std::collections::HashMap;
use std::time::Duration;

pub type PriceMap = HashMap<String, PriceSeries>;

pub trait PriceCache: Send + Sync {
    /// Returns the entry for `key` if younger than `ttl`, otherwise runs
    /// `compute`, stores its result and returns it. Errors are not cached.
    fn get_or_fetch(
        &self,
        key: &str,
        ttl: Duration,
        compute: &dyn Fn() -> Result<PriceMap, RotatorError>,
    ) -> Result<PriceMap, RotatorError>;

    fn invalidate(&self, key: &str);
}
