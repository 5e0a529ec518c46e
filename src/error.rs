use std::fmt;

use thiserror::Error;

/// Grid axis a validation error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FootprintError {
    #[error("footprint: radius in {axis} ({value}) must be >= 2")]
    InvalidRadius { axis: Axis, value: usize },
    #[error("footprint: radius in {axis} ({radius}) must be < grid in {axis} ({grid})")]
    RadiusExceedsGrid {
        axis: Axis,
        radius: usize,
        grid: usize,
    },
}

impl FootprintError {
    pub fn axis(&self) -> Axis {
        match self {
            FootprintError::InvalidRadius { axis, .. }
            | FootprintError::RadiusExceedsGrid { axis, .. } => *axis,
        }
    }
}
