//! Multi-horizon scoring: reduces a coordinate history to one 0-10 score.
//!
//! raw = 5 + trend_strength*0.12 + momentum*0.04 per valid sample.
//! The raw scores, ordered oldest to newest, are combined with an increasing
//! weight vector, then +bonus for every adjacent pair where the newer score is
//! strictly higher (capped), then clamped to [0, 10].

use crate::domain::quadrant::Quadrant;
use crate::domain::rrg::{CoordinateHistory, RrgCoordinate};
use std::fmt;
use std::str::FromStr;

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 10.0;

/// How samples without enough history enter the weighted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingSamplePolicy {
    /// Weighted average over valid samples only, renormalized by their weights.
    #[default]
    Exclude,
    /// Missing samples count as raw score 0 at their nominal weight.
    ZeroFill,
}

impl fmt::Display for MissingSamplePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingSamplePolicy::Exclude => write!(f, "exclude"),
            MissingSamplePolicy::ZeroFill => write!(f, "zero_fill"),
        }
    }
}

impl FromStr for MissingSamplePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exclude" => Ok(MissingSamplePolicy::Exclude),
            "zero_fill" | "zerofill" | "zero" => Ok(MissingSamplePolicy::ZeroFill),
            other => Err(format!("unknown missing sample policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScorerConfig {
    /// Ordered oldest to newest; its length is the history length.
    pub weights: Vec<f64>,
    pub base_score: f64,
    pub trend_coefficient: f64,
    pub momentum_coefficient: f64,
    pub consistency_bonus: f64,
    pub max_bonus_steps: usize,
    pub missing_samples: MissingSamplePolicy,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            weights: vec![0.05, 0.10, 0.15, 0.25, 0.45],
            base_score: 5.0,
            trend_coefficient: 0.12,
            momentum_coefficient: 0.04,
            consistency_bonus: 0.2,
            max_bonus_steps: 4,
            missing_samples: MissingSamplePolicy::Exclude,
        }
    }
}

impl ScorerConfig {
    pub fn history_length(&self) -> usize {
        self.weights.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCard {
    pub score: f64,
    /// Quadrant of the most recent valid sample.
    pub quadrant: Quadrant,
    pub valid_samples: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MultiHorizonScorer {
    config: ScorerConfig,
}

impl MultiHorizonScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn raw_score(&self, coordinate: &RrgCoordinate) -> f64 {
        self.config.base_score
            + coordinate.trend_strength * self.config.trend_coefficient
            + coordinate.momentum * self.config.momentum_coefficient
    }

    /// Score of a history, or `None` when it holds no valid sample.
    pub fn score(&self, history: &CoordinateHistory) -> Option<ScoreCard> {
        let quadrant = history.latest_valid()?.quadrant();

        // newest samples line up with the newest weights
        let raw: Vec<Option<f64>> = history
            .oldest_first()
            .map(|s| s.coordinate().map(|c| self.raw_score(c)))
            .collect();
        let n = raw.len().min(self.config.weights.len());
        let raw = &raw[raw.len() - n..];
        let weights = &self.config.weights[self.config.weights.len() - n..];

        let (weighted, sequence) = match self.config.missing_samples {
            MissingSamplePolicy::Exclude => {
                let pairs: Vec<(f64, f64)> = weights
                    .iter()
                    .zip(raw)
                    .filter_map(|(&w, s)| s.map(|s| (w, s)))
                    .collect();
                let weight_sum: f64 = pairs.iter().map(|(w, _)| w).sum();
                let weighted = if weight_sum > 0.0 {
                    pairs.iter().map(|(w, s)| w * s).sum::<f64>() / weight_sum
                } else {
                    pairs.iter().map(|(_, s)| s).sum::<f64>() / pairs.len() as f64
                };
                (weighted, pairs.into_iter().map(|(_, s)| s).collect::<Vec<f64>>())
            }
            MissingSamplePolicy::ZeroFill => {
                let filled: Vec<f64> = raw.iter().map(|s| s.unwrap_or(0.0)).collect();
                let weighted = weights.iter().zip(&filled).map(|(w, s)| w * s).sum::<f64>();
                (weighted, filled)
            }
        };

        let steps = sequence
            .windows(2)
            .filter(|pair| pair[1] > pair[0])
            .count()
            .min(self.config.max_bonus_steps);
        let bonus = steps as f64 * self.config.consistency_bonus;
        let score = (weighted + bonus).clamp(SCORE_MIN, SCORE_MAX);

        Some(ScoreCard {
            score,
            quadrant,
            valid_samples: history.valid_count(),
        })
    }
}
