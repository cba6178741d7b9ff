//! Configuration validation.
//!
//! Every section is parsed into its typed form here, so a config that
//! validates is also one the pipeline can run with.

use crate::domain::backtest::RotationConfig;
use crate::domain::error::RotatorError;
use crate::domain::regime::SignalBasis;
use crate::domain::scorer::{MissingSamplePolicy, ScorerConfig};
use crate::domain::snapshot::RrgConfig;
use crate::domain::store::Frequency;
use crate::domain::zscore::NormalizerConfig;
use crate::ports::config_port::ConfigPort;
use chrono::{Days, NaiveDate};
use std::path::PathBuf;
use std::time::Duration;

/// Calendar days fetched before the start date to warm up rolling windows.
pub const WARMUP_DAYS: u64 = 150;
pub const DEFAULT_CACHE_TTL_SECS: i64 = 86_400;
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct DataSettings {
    pub directory: PathBuf,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cache_ttl: Duration,
}

impl DataSettings {
    pub fn fetch_start(&self) -> NaiveDate {
        self.start_date
            .checked_sub_days(Days::new(WARMUP_DAYS))
            .unwrap_or(NaiveDate::MIN)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UniverseSettings {
    pub metadata: PathBuf,
    pub benchmark: String,
    pub driver_a: String,
    pub driver_b: String,
}

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), RotatorError> {
    data_settings(config)?;
    universe_settings(config)?;
    rrg_config(config)?;
    rotation_config(config)?;
    Ok(())
}

pub fn data_settings(config: &dyn ConfigPort) -> Result<DataSettings, RotatorError> {
    let directory = required(config, "data", "directory")?;
    let start_date = parse_date(config, "start_date")?;
    let end_date = parse_date(config, "end_date")?;
    if start_date >= end_date {
        return Err(RotatorError::invalid(
            "data",
            "start_date",
            "start_date must be before end_date",
        ));
    }

    let ttl = int_or(config, "data", "cache_ttl_secs", DEFAULT_CACHE_TTL_SECS)?;
    if ttl < 0 {
        return Err(RotatorError::invalid(
            "data",
            "cache_ttl_secs",
            "cache_ttl_secs must be non-negative",
        ));
    }

    Ok(DataSettings {
        directory: PathBuf::from(directory),
        start_date,
        end_date,
        cache_ttl: Duration::from_secs(ttl as u64),
    })
}

pub fn universe_settings(config: &dyn ConfigPort) -> Result<UniverseSettings, RotatorError> {
    let metadata = required(config, "universe", "metadata")?;
    let benchmark = required(config, "universe", "benchmark")?;
    let driver_a = optional(config, "universe", "driver_a").unwrap_or_else(|| "HG=F".to_string());
    let driver_b = optional(config, "universe", "driver_b").unwrap_or_else(|| "GC=F".to_string());
    if driver_a == driver_b {
        return Err(RotatorError::invalid(
            "universe",
            "driver_b",
            "driver_a and driver_b must differ",
        ));
    }

    Ok(UniverseSettings {
        metadata: PathBuf::from(metadata),
        benchmark,
        driver_a,
        driver_b,
    })
}

pub fn rrg_config(config: &dyn ConfigPort) -> Result<RrgConfig, RotatorError> {
    let defaults = RrgConfig::default();
    let normalizer = defaults.normalizer;

    let frequency = parse_enum(config, "rrg", "frequency", defaults.frequency)?;
    let smoothing_span = at_least(config, "rrg", "smoothing_span", defaults.smoothing_span, 1)?;
    // a sample standard deviation needs two observations
    let trend_window = at_least(config, "rrg", "trend_window", normalizer.trend_window, 2)?;
    let momentum_window =
        at_least(config, "rrg", "momentum_window", normalizer.momentum_window, 2)?;
    if momentum_window > trend_window {
        return Err(RotatorError::invalid(
            "rrg",
            "momentum_window",
            "momentum_window must not exceed trend_window",
        ));
    }
    let scale_factor = double_or(config, "rrg", "scale_factor", normalizer.scale_factor)?;
    if !scale_factor.is_finite() || scale_factor <= 0.0 {
        return Err(RotatorError::invalid(
            "rrg",
            "scale_factor",
            "scale_factor must be positive",
        ));
    }
    let history_step = at_least(config, "rrg", "history_step", defaults.history_step, 1)?;

    let weights = parse_weights(config, defaults.scorer.weights.clone())?;
    let consistency_bonus = double_or(
        config,
        "rrg",
        "consistency_bonus",
        defaults.scorer.consistency_bonus,
    )?;
    if !consistency_bonus.is_finite() || consistency_bonus < 0.0 {
        return Err(RotatorError::invalid(
            "rrg",
            "consistency_bonus",
            "consistency_bonus must be non-negative",
        ));
    }
    let max_bonus_steps = at_least(
        config,
        "rrg",
        "max_bonus_steps",
        defaults.scorer.max_bonus_steps,
        0,
    )?;
    let missing_samples: MissingSamplePolicy =
        parse_enum(config, "rrg", "missing_samples", defaults.scorer.missing_samples)?;

    Ok(RrgConfig {
        frequency,
        smoothing_span,
        normalizer: NormalizerConfig {
            trend_window,
            momentum_window,
            scale_factor,
        },
        history_step,
        scorer: ScorerConfig {
            weights,
            consistency_bonus,
            max_bonus_steps,
            missing_samples,
            ..defaults.scorer
        },
    })
}

pub fn rotation_config(config: &dyn ConfigPort) -> Result<RotationConfig, RotatorError> {
    let defaults = RotationConfig::default();
    let frequency: Frequency = parse_enum(config, "rotation", "frequency", defaults.frequency)?;
    let ma_window = at_least(config, "rotation", "ma_window", defaults.ma_window, 1)?;
    let basis: SignalBasis = parse_enum(config, "rotation", "ma_basis", defaults.basis)?;
    let top_k = at_least(config, "rotation", "top_k", defaults.top_k, 1)?;

    Ok(RotationConfig {
        frequency,
        ma_window,
        basis,
        top_k,
    })
}

fn optional(config: &dyn ConfigPort, section: &str, key: &str) -> Option<String> {
    config
        .get_string(section, key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn required(config: &dyn ConfigPort, section: &str, key: &str) -> Result<String, RotatorError> {
    optional(config, section, key).ok_or_else(|| RotatorError::missing(section, key))
}

fn parse_date(config: &dyn ConfigPort, field: &str) -> Result<NaiveDate, RotatorError> {
    let value = required(config, "data", field)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| {
        RotatorError::invalid(
            "data",
            field,
            format!("invalid {field} format, expected YYYY-MM-DD"),
        )
    })
}

fn int_or(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: i64,
) -> Result<i64, RotatorError> {
    config
        .get_int(section, key)
        .map(|value| value.unwrap_or(default))
        .map_err(|_| RotatorError::invalid(section, key, format!("{key} must be an integer")))
}

fn double_or(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<f64, RotatorError> {
    config
        .get_double(section, key)
        .map(|value| value.unwrap_or(default))
        .map_err(|_| RotatorError::invalid(section, key, format!("{key} must be a number")))
}

fn at_least(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: usize,
    min: usize,
) -> Result<usize, RotatorError> {
    let value = int_or(config, section, key, default as i64)?;
    if value < min as i64 {
        return Err(RotatorError::invalid(
            section,
            key,
            format!("{key} must be at least {min}"),
        ));
    }
    Ok(value as usize)
}

fn parse_enum<T>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: T,
) -> Result<T, RotatorError>
where
    T: std::str::FromStr<Err = String>,
{
    match optional(config, section, key) {
        None => Ok(default),
        Some(value) => value
            .parse::<T>()
            .map_err(|reason| RotatorError::invalid(section, key, reason)),
    }
}

fn parse_weights(config: &dyn ConfigPort, default: Vec<f64>) -> Result<Vec<f64>, RotatorError> {
    let Some(items) = config.get_list("rrg", "weights") else {
        return Ok(default);
    };

    let weights = items
        .iter()
        .map(|item| {
            item.parse::<f64>()
                .ok()
                .filter(|w| w.is_finite() && *w >= 0.0)
                .ok_or_else(|| {
                    RotatorError::invalid("rrg", "weights", format!("invalid weight '{item}'"))
                })
        })
        .collect::<Result<Vec<f64>, RotatorError>>()?;

    if weights.is_empty() {
        return Err(RotatorError::invalid("rrg", "weights", "weights must not be empty"));
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(RotatorError::invalid(
            "rrg",
            "weights",
            format!("weights must sum to 1, got {sum}"),
        ));
    }
    Ok(weights)
}
