//! Quadrant classification of an RRG coordinate.
//!
//! The axes split at 0 and the boundary belongs to the non-negative side.

use crate::domain::rrg::RrgCoordinate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// strength >= 0, momentum >= 0
    Leading,
    /// strength >= 0, momentum < 0
    Weakening,
    /// strength < 0, momentum < 0
    Lagging,
    /// strength < 0, momentum >= 0
    Improving,
}

impl Quadrant {
    pub fn classify(coordinate: &RrgCoordinate) -> Self {
        match (coordinate.trend_strength >= 0.0, coordinate.momentum >= 0.0) {
            (true, true) => Quadrant::Leading,
            (true, false) => Quadrant::Weakening,
            (false, false) => Quadrant::Lagging,
            (false, true) => Quadrant::Improving,
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Quadrant::Leading => "Leading",
            Quadrant::Weakening => "Weakening",
            Quadrant::Lagging => "Lagging",
            Quadrant::Improving => "Improving",
        };
        write!(f, "{label}")
    }
}
