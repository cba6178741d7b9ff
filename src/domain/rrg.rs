//! Relative Rotation Graph coordinates and coordinate histories.

use crate::domain::quadrant::Quadrant;

/// Normalized position of an instrument relative to the benchmark.
///
/// Both axes are centered on 0 ("in line with the benchmark") and are
/// z-scores multiplied by a fixed scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RrgCoordinate {
    pub trend_strength: f64,
    pub momentum: f64,
}

impl RrgCoordinate {
    /// `None` unless both axes are finite.
    pub fn new(trend_strength: f64, momentum: f64) -> Option<Self> {
        (trend_strength.is_finite() && momentum.is_finite()).then_some(Self {
            trend_strength,
            momentum,
        })
    }

    pub fn quadrant(&self) -> Quadrant {
        Quadrant::classify(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateSample {
    Valid(RrgCoordinate),
    /// Not enough history behind this sample for the rolling windows.
    Invalid,
}

impl CoordinateSample {
    pub fn coordinate(&self) -> Option<&RrgCoordinate> {
        match self {
            CoordinateSample::Valid(c) => Some(c),
            CoordinateSample::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, CoordinateSample::Valid(_))
    }
}

impl From<Option<RrgCoordinate>> for CoordinateSample {
    fn from(value: Option<RrgCoordinate>) -> Self {
        value.map_or(CoordinateSample::Invalid, CoordinateSample::Valid)
    }
}

/// Samples taken at fixed step offsets going back from now, most recent first.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateHistory {
    /// `samples[k]` is taken `k * step` periods before the latest observation.
    pub samples: Vec<CoordinateSample>,
    pub step: usize,
}

impl CoordinateHistory {
    pub fn new(samples: Vec<CoordinateSample>, step: usize) -> Self {
        Self { samples, step }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample that is valid.
    pub fn latest_valid(&self) -> Option<&RrgCoordinate> {
        self.samples.iter().find_map(CoordinateSample::coordinate)
    }

    pub fn valid_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_valid()).count()
    }

    /// Samples reordered oldest first.
    pub fn oldest_first(&self) -> impl Iterator<Item = &CoordinateSample> {
        self.samples.iter().rev()
    }
}
