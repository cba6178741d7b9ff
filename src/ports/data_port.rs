//! Price fetch port.

use crate::domain::error::RotatorError;
use crate::domain::price_series::PriceSeries;
use chrono::NaiveDate;
use std::collections::HashMap;

pub trait PricePort {
    /// Close prices for `ids` within `[start_date, end_date]`.
    ///
    /// Results may be partial: an id with no data is simply absent from the
    /// map. `Err` is reserved for failures of the source itself.
    fn fetch(
        &self,
        ids: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<HashMap<String, PriceSeries>, RotatorError>;
}
