//! # Viewer Configuration
//!
//! Loaded once at startup from a TOML file. Every field has a default, so
//! an empty file is a valid config:
//!
//! ```toml
//! target_fps = 100.0
//! diagnostics_period = 30
//! cell_size = 3
//! schema = "rich"
//!
//! [color]
//! velocity_scale = 30.0
//! pressure_scale = 10.0
//!
//! [engine]
//! width = 256
//! height = 256
//! ```

use std::path::Path;
use std::time::Duration;

use cfdview_core::{Grid, Schema};
use cfdview_rendering::{CanvasGeometry, ColorScale};
use cfdview_sim::SimConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::scheduler::{
    rate_interval, SchedulerSettings, DEFAULT_DIAGNOSTICS_PERIOD, DEFAULT_TARGET_FPS, MAX_RATE_HZ,
    MIN_RATE_HZ,
};

/// Everything the viewer binary needs to start a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Target ticks per second.
    pub target_fps: f64,
    /// Ticks between diagnostics reports.
    pub diagnostics_period: u64,
    /// Side of one painted cell in pixels.
    pub cell_size: u32,
    /// Schema the engine is expected to produce.
    pub schema: Schema,
    /// Rich color calibration.
    pub color: ColorScale,
    /// Stop after this many ticks. Unset runs until interrupted.
    pub max_frames: Option<u64>,
    /// Emulated display refresh rate. Unset means no display sync wait.
    pub display_refresh_hz: Option<f64>,
    /// Reference engine parameters.
    pub engine: SimConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            diagnostics_period: DEFAULT_DIAGNOSTICS_PERIOD,
            cell_size: 3,
            schema: Schema::Rich,
            color: ColorScale::default(),
            max_frames: None,
            display_refresh_hz: None,
            engine: SimConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// - `Read` if the file cannot be read
    /// - `Parse` if it is not valid TOML for this schema
    /// - `Invalid` if a value is out of range
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Parses and validates config text.
    ///
    /// # Errors
    ///
    /// Same as [`ViewerConfig::load`], minus `Read`.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first bad value.
    pub fn validate(&self) -> ConfigResult<()> {
        if rate_interval(self.target_fps).is_none() {
            return Err(invalid(format!(
                "target_fps must be within {MIN_RATE_HZ}..={MAX_RATE_HZ}, got {}",
                self.target_fps
            )));
        }
        if self.diagnostics_period == 0 {
            return Err(invalid("diagnostics_period must be at least 1".to_owned()));
        }
        if self.cell_size == 0 {
            return Err(invalid("cell_size must be at least 1".to_owned()));
        }
        if !self.color.is_valid() {
            return Err(invalid(format!(
                "color scales must be positive, got velocity {} pressure {}",
                self.color.velocity_scale, self.color.pressure_scale
            )));
        }
        if let Some(hz) = self.display_refresh_hz {
            if rate_interval(hz).is_none() {
                return Err(invalid(format!(
                    "display_refresh_hz must be within {MIN_RATE_HZ}..={MAX_RATE_HZ}, got {hz}"
                )));
            }
        }
        self.engine
            .validate()
            .map_err(|err| invalid(format!("engine: {err}")))?;

        let grid = Grid::new(self.engine.width, self.engine.height)
            .map_err(|err| invalid(format!("engine: {err}")))?;
        CanvasGeometry::new(grid, self.cell_size).map_err(|err| invalid(err.to_string()))?;
        Ok(())
    }

    /// Scheduler parameters from this config.
    #[must_use]
    pub fn scheduler_settings(&self) -> SchedulerSettings {
        SchedulerSettings {
            target_fps: self.target_fps,
            diagnostics_period: self.diagnostics_period,
            cell_size: self.cell_size,
            schema: self.schema,
            color: self.color,
            max_frames: self.max_frames,
        }
    }

    /// Emulated display refresh interval. Rates outside the accepted
    /// range give `None`.
    #[must_use]
    pub fn display_refresh(&self) -> Option<Duration> {
        self.display_refresh_hz.and_then(rate_interval)
    }
}

fn invalid(reason: String) -> ConfigError {
    ConfigError::Invalid { reason }
}
