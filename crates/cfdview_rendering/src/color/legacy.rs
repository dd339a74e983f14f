//! Legacy grey shading.
//!
//! `shade = 255 - (velocity_x + velocity_y) * 2`, unclamped. Fast cells
//! drive the shade negative; that is a known defect of the legacy producer
//! and stays visible through [`GrayShade::in_gamut`].

use super::Rgb;

/// Raw legacy shade, possibly outside `0..=255`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GrayShade(i32);

impl GrayShade {
    /// The unclamped shade value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Returns true if the shade is a valid channel value.
    #[inline]
    #[must_use]
    pub const fn in_gamut(self) -> bool {
        self.0 >= 0 && self.0 <= 255
    }

    /// Paintable grey, saturated into `0..=255` the way a canvas fill
    /// style saturates out-of-range channels.
    #[inline]
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        Rgb::gray(self.0.clamp(0, 255) as u8)
    }
}

/// Maps legacy velocity bytes to a grey shade.
#[inline]
#[must_use]
pub fn legacy_shade(velocity_x: u8, velocity_y: u8) -> GrayShade {
    GrayShade(255 - (i32::from(velocity_x) + i32::from(velocity_y)) * 2)
}
