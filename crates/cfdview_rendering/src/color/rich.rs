//! Pressure + velocity color transfer.
//!
//! ```text
//! p_norm:  -1 ─────────── 0 ─────────── +1
//! color:   blue ← cyan ← white → yellow → red
//! ```
//!
//! Brightness runs from 50% (still) to 100% (speed >= velocity scale).
//! All arithmetic is done in f64.

use super::{channel, ColorScale, Rgb, GREEN_RETENTION, MIN_BRIGHTNESS};

/// Flow intensity in `[0, 1]` from the velocity components.
///
/// NaN velocity counts as still flow.
#[inline]
#[must_use]
pub fn flow_intensity(velocity_x: f32, velocity_y: f32, velocity_scale: f64) -> f64 {
    let speed = f64::from(velocity_x).hypot(f64::from(velocity_y));
    let intensity = speed / velocity_scale;
    if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 1.0)
    }
}

/// Squashes pressure into `(-1, 1)` with `tanh(pressure / scale)`.
///
/// NaN pressure counts as zero.
#[inline]
#[must_use]
pub fn normalize_pressure(pressure: f32, pressure_scale: f64) -> f64 {
    let p_norm = (f64::from(pressure) / pressure_scale).tanh();
    if p_norm.is_nan() {
        0.0
    } else {
        p_norm
    }
}

/// Base color for a normalized pressure, before brightness.
#[inline]
#[must_use]
pub fn base_color(p_norm: f64) -> Rgb {
    if p_norm >= 0.0 {
        Rgb::new(
            255,
            channel(255.0 * (1.0 - p_norm * GREEN_RETENTION)),
            channel(255.0 * (1.0 - p_norm)),
        )
    } else {
        Rgb::new(
            channel(255.0 * (1.0 + p_norm)),
            channel(255.0 * (1.0 + p_norm * GREEN_RETENTION)),
            255,
        )
    }
}

/// Brightness factor for a flow intensity.
#[inline]
#[must_use]
pub fn brightness(intensity: f64) -> f64 {
    MIN_BRIGHTNESS + (1.0 - MIN_BRIGHTNESS) * intensity
}

/// Maps one rich cell to a color.
///
/// Obstacles return black without looking at velocity or pressure.
#[must_use]
pub fn rich_color(
    is_obstacle: bool,
    velocity_x: f32,
    velocity_y: f32,
    pressure: f32,
    scale: &ColorScale,
) -> Rgb {
    if is_obstacle {
        return Rgb::BLACK;
    }

    let intensity = flow_intensity(velocity_x, velocity_y, scale.velocity_scale);
    let base = base_color(normalize_pressure(pressure, scale.pressure_scale));
    let factor = brightness(intensity);

    Rgb::new(
        channel(f64::from(base.r) * factor),
        channel(f64::from(base.g) * factor),
        channel(f64::from(base.b) * factor),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(obstacle: bool, vx: f32, vy: f32, p: f32) -> Rgb {
        rich_color(obstacle, vx, vy, p, &ColorScale::default())
    }

    #[test]
    fn test_obstacle_is_black() {
        assert_eq!(color(true, 0.0, 0.0, 0.0), Rgb::BLACK);
        assert_eq!(color(true, 100.0, -3.0, 55.0), Rgb::BLACK);
        assert_eq!(color(true, f32::NAN, f32::INFINITY, f32::NAN), Rgb::BLACK);
    }

    #[test]
    fn test_zero_pressure_is_white_base() {
        assert_eq!(base_color(normalize_pressure(0.0, 10.0)), Rgb::WHITE);
        // Saturated flow keeps full brightness.
        assert_eq!(color(false, 30.0, 0.0, 0.0), Rgb::WHITE);
        // Still flow is half brightness.
        assert_eq!(color(false, 0.0, 0.0, 0.0), Rgb::gray(127));
    }

    #[test]
    fn test_reference_cell() {
        // v = 5, intensity = 1/6, brightness = 0.58333
        assert_eq!(color(false, 3.0, 4.0, 0.0), Rgb::gray(148));
    }

    #[test]
    fn test_pressure_extremes() {
        let high = color(false, 30.0, 0.0, 1.0e6);
        assert_eq!(high.r, 255);
        assert!(high.b <= 1);
        assert!(high.g >= 76 && high.g <= 77);

        let low = color(false, 30.0, 0.0, -1.0e6);
        assert_eq!(low.b, 255);
        assert!(low.r <= 1);
    }

    #[test]
    fn test_monotone_toward_red() {
        let mut previous = color(false, 10.0, 5.0, 0.0);
        for step in 1..400 {
            let current = color(false, 10.0, 5.0, step as f32 * 0.25);
            assert!(current.g <= previous.g, "green rose at step {step}");
            assert!(current.b <= previous.b, "blue rose at step {step}");
            previous = current;
        }
    }

    #[test]
    fn test_monotone_toward_blue() {
        let mut previous = color(false, 10.0, 5.0, 0.0);
        for step in 1..400 {
            let current = color(false, 10.0, 5.0, -(step as f32) * 0.25);
            assert!(current.r <= previous.r, "red rose at step {step}");
            assert!(current.g <= previous.g, "green rose at step {step}");
            previous = current;
        }
    }

    #[test]
    fn test_non_finite_inputs_stay_in_gamut() {
        assert_eq!(color(false, f32::NAN, 0.0, 0.0), Rgb::gray(127));
        assert_eq!(color(false, f32::INFINITY, 0.0, 0.0), Rgb::WHITE);
        assert_eq!(color(false, 30.0, 0.0, f32::NAN), Rgb::WHITE);
        let hot = color(false, 30.0, 0.0, f32::INFINITY);
        assert_eq!((hot.r, hot.b), (255, 0));
    }

    #[test]
    fn test_custom_scale() {
        let scale = ColorScale {
            velocity_scale: 5.0,
            pressure_scale: 10.0,
        };
        assert_eq!(rich_color(false, 3.0, 4.0, 0.0, &scale), Rgb::WHITE);
    }
}
