//! Color mapping.
//!
//! Two pure transfer functions, one per schema. A renderer picks one at
//! construction and never mixes them.

mod legacy;
mod rich;

pub use legacy::{legacy_shade, GrayShade};
pub use rich::{base_color, brightness, flow_intensity, normalize_pressure, rich_color};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Speed at which flow intensity saturates.
pub const VELOCITY_SCALE: f64 = 30.0;

/// Pressure divisor applied before `tanh`.
pub const PRESSURE_SCALE: f64 = 10.0;

/// Fraction of the green fall-off applied on both sides of zero pressure.
pub const GREEN_RETENTION: f64 = 0.7;

/// Brightness of a cell with no flow.
pub const MIN_BRIGHTNESS: f64 = 0.5;

/// 8-bit RGB color.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// Obstacle color.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Zero-pressure base color.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a color.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Grey with all channels equal.
    #[inline]
    #[must_use]
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }
}

/// Calibration of the rich color transfer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScale {
    /// Speed at which brightness saturates.
    pub velocity_scale: f64,
    /// Pressure divisor applied before `tanh`.
    pub pressure_scale: f64,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self {
            velocity_scale: VELOCITY_SCALE,
            pressure_scale: PRESSURE_SCALE,
        }
    }
}

impl ColorScale {
    /// Returns true if both scales are finite and positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.velocity_scale.is_finite()
            && self.velocity_scale > 0.0
            && self.pressure_scale.is_finite()
            && self.pressure_scale > 0.0
    }
}

/// Floors a channel value and clamps it into `0..=255`. NaN maps to 0.
#[inline]
pub(crate) fn channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.floor().clamp(0.0, 255.0) as u8
}
