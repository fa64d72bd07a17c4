//! Parameter ranges for a scatter run.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const MIN_DENSITY: u8 = 1;
pub const MAX_DENSITY: u8 = 100;
pub const MAX_ROTATION_DEGREES: f32 = 360.0;

/// Ranges for per-instance scale and rotation, and the share of targets to populate.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScatterParameters {
    /// Lower bound of the uniform scale factor. Must be > 0.
    pub min_scale: f32,
    /// Upper bound of the uniform scale factor.
    pub max_scale: f32,
    /// Lower bound of the rotation in degrees, within [0, 360].
    pub min_rotation: f32,
    /// Upper bound of the rotation in degrees, within [0, 360].
    pub max_rotation: f32,
    /// Percentage of targets that receive an instance, within [1, 100].
    pub density: u8,
}

impl Default for ScatterParameters {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 1.0,
            min_rotation: 0.0,
            max_rotation: MAX_ROTATION_DEGREES,
            density: MAX_DENSITY,
        }
    }
}

impl ScatterParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scale range.
    pub fn with_scale_range(mut self, min: f32, max: f32) -> Self {
        self.min_scale = min;
        self.max_scale = max;
        self
    }

    /// Sets the rotation range in degrees.
    pub fn with_rotation_range(mut self, min: f32, max: f32) -> Self {
        self.min_rotation = min;
        self.max_rotation = max;
        self
    }

    /// Sets the density percentage.
    pub fn with_density(mut self, density: u8) -> Self {
        self.density = density;
        self
    }

    /// Validates the parameters, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.min_scale.is_finite() || !self.max_scale.is_finite() {
            return Err(Error::InvalidParameter("scale bounds must be finite".into()));
        }
        if self.min_scale <= 0.0 {
            return Err(Error::InvalidParameter("min_scale must be > 0".into()));
        }
        if self.min_scale > self.max_scale {
            return Err(Error::InvalidParameter(format!(
                "min_scale ({}) must not exceed max_scale ({})",
                self.min_scale, self.max_scale
            )));
        }
        let rotation_bounds = 0.0..=MAX_ROTATION_DEGREES;
        if !rotation_bounds.contains(&self.min_rotation)
            || !rotation_bounds.contains(&self.max_rotation)
        {
            return Err(Error::InvalidParameter(
                "rotation bounds must lie within [0, 360] degrees".into(),
            ));
        }
        if self.min_rotation > self.max_rotation {
            return Err(Error::InvalidParameter(format!(
                "min_rotation ({}) must not exceed max_rotation ({})",
                self.min_rotation, self.max_rotation
            )));
        }
        if !(MIN_DENSITY..=MAX_DENSITY).contains(&self.density) {
            return Err(Error::InvalidParameter(format!(
                "density must be within [{MIN_DENSITY}, {MAX_DENSITY}], got {}",
                self.density
            )));
        }

        Ok(())
    }
}
