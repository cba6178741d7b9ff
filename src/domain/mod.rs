//! Core domain types and logic.

pub mod backtest;
pub mod config_validation;
pub mod error;
pub mod indicator;
pub mod metrics;
pub mod price_series;
pub mod quadrant;
pub mod regime;
pub mod relative_strength;
pub mod rrg;
pub mod scorer;
pub mod snapshot;
pub mod store;
pub mod universe;
pub mod zscore;
