use serde::{Deserialize, Serialize};

use crate::error::{Axis, FootprintError};

/// Per-cell weighting inside the footprint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    /// Every included cell is 1.0.
    #[default]
    Uniform,
    /// Gaussian falloff on Euclidean distance from the center.
    Gaussian,
}

impl From<bool> for Weighting {
    fn from(weighted: bool) -> Self {
        if weighted {
            Weighting::Gaussian
        } else {
            Weighting::Uniform
        }
    }
}

/// Footprint parameters. Radii count the center cell, so `rx = 2` reaches
/// one cell past the center along x.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootprintParams {
    pub rx: usize,
    pub ry: usize,
    pub gx: usize,
    pub gy: usize,
    pub weighting: Weighting,
}

impl Default for FootprintParams {
    fn default() -> Self {
        Self {
            rx: 2,
            ry: 2,
            gx: 4,
            gy: 4,
            weighting: Weighting::Uniform,
        }
    }
}

impl FootprintParams {
    pub fn new(rx: usize, ry: usize, gx: usize, gy: usize, weighting: Weighting) -> Self {
        Self {
            rx,
            ry,
            gx,
            gy,
            weighting,
        }
    }

    /// Checks run in a fixed order; the first failure is returned.
    pub fn validate(&self) -> Result<(), FootprintError> {
        if self.rx <= 1 {
            return Err(FootprintError::InvalidRadius {
                axis: Axis::X,
                value: self.rx,
            });
        }
        if self.ry <= 1 {
            return Err(FootprintError::InvalidRadius {
                axis: Axis::Y,
                value: self.ry,
            });
        }
        if self.rx >= self.gx {
            return Err(FootprintError::RadiusExceedsGrid {
                axis: Axis::X,
                radius: self.rx,
                grid: self.gx,
            });
        }
        if self.ry >= self.gy {
            return Err(FootprintError::RadiusExceedsGrid {
                axis: Axis::Y,
                radius: self.ry,
                grid: self.gy,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(FootprintParams::default().validate().is_ok());
    }

    #[test]
    fn validation_order_is_rx_ry_then_grid() {
        // Everything wrong: rx lower bound wins.
        let p = FootprintParams::new(1, 0, 1, 0, Weighting::Uniform);
        assert_eq!(
            p.validate(),
            Err(FootprintError::InvalidRadius { axis: Axis::X, value: 1 })
        );

        // ry lower bound beats rx-vs-gx.
        let p = FootprintParams::new(9, 1, 4, 4, Weighting::Uniform);
        assert_eq!(
            p.validate(),
            Err(FootprintError::InvalidRadius { axis: Axis::Y, value: 1 })
        );

        let p = FootprintParams::new(5, 5, 4, 4, Weighting::Uniform);
        assert_eq!(p.validate().unwrap_err().axis(), Axis::X);

        let p = FootprintParams::new(2, 4, 4, 4, Weighting::Uniform);
        assert_eq!(
            p.validate(),
            Err(FootprintError::RadiusExceedsGrid {
                axis: Axis::Y,
                radius: 4,
                grid: 4
            })
        );
    }

    #[test]
    fn deserializes_partial_json() {
        let p: FootprintParams =
            serde_json::from_str(r#"{"rx": 3, "gx": 7, "weighting": "gaussian"}"#).unwrap();
        assert_eq!(p, FootprintParams::new(3, 2, 7, 4, Weighting::Gaussian));
    }

    #[test]
    fn weighting_from_flag() {
        assert_eq!(Weighting::from(false), Weighting::Uniform);
        assert_eq!(Weighting::from(true), Weighting::Gaussian);
    }
}
