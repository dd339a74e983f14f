//! Solver parameters.

use cfdview_core::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// Parameters of the channel-flow solver.
///
/// Every field has a default, so a config file only names what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Grid columns.
    pub width: u32,
    /// Grid rows.
    pub height: u32,
    /// Jacobi iterations of the pressure solve per tick.
    pub pressure_iterations: u32,
    /// Time step.
    pub dt: f32,
    /// Kinematic viscosity.
    pub viscosity: f32,
    /// Fluid density.
    pub density: f32,
    /// Peak velocity of the parabolic inlet profile.
    pub inlet_velocity: f32,
    /// Cylinder radius in cells.
    pub obstacle_radius: f32,
    /// Rows the cylinder centre sits below the channel midline.
    pub obstacle_offset: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            pressure_iterations: 50,
            dt: 0.01,
            viscosity: 0.5,
            density: 1.0,
            inlet_velocity: 30.0,
            obstacle_radius: 20.0,
            obstacle_offset: 20.0,
        }
    }
}

impl SimConfig {
    /// Smallest grid side with at least one interior cell.
    pub const MIN_SIDE: u32 = 3;

    /// Checks the parameters can drive the solver.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> EngineResult<()> {
        if self.width < Self::MIN_SIDE || self.height < Self::MIN_SIDE {
            return Err(invalid(format!(
                "grid {}x{} is smaller than {min}x{min}",
                self.width,
                self.height,
                min = Self::MIN_SIDE
            )));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(invalid(format!("dt must be positive, got {}", self.dt)));
        }
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(invalid(format!("density must be positive, got {}", self.density)));
        }
        if !(self.viscosity.is_finite() && self.viscosity >= 0.0) {
            return Err(invalid(format!(
                "viscosity must be non-negative, got {}",
                self.viscosity
            )));
        }
        if !self.inlet_velocity.is_finite() {
            return Err(invalid("inlet_velocity must be finite".to_owned()));
        }
        if !(self.obstacle_radius.is_finite() && self.obstacle_radius >= 0.0) {
            return Err(invalid(format!(
                "obstacle_radius must be non-negative, got {}",
                self.obstacle_radius
            )));
        }
        if !self.obstacle_offset.is_finite() {
            return Err(invalid("obstacle_offset must be finite".to_owned()));
        }
        Ok(())
    }

    /// Inlet velocity at `row`: `U_max * 4 * y/h * (1 - y/h)`.
    #[inline]
    #[must_use]
    pub fn inlet_profile(&self, row: u32) -> f32 {
        let y = row as f32 / self.height as f32;
        self.inlet_velocity * 4.0 * y * (1.0 - y)
    }
}

fn invalid(reason: String) -> EngineError {
    EngineError::InvalidConfig { reason }
}
