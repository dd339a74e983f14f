//! # Viewer Error Types
//!
//! Engine, decode and paint failures all end the session: the scheduler
//! moves to `Failed` and hands the error to the host. Nothing is retried.

use std::path::PathBuf;

use cfdview_core::{EngineError, ViewError};
use cfdview_rendering::RenderError;
use thiserror::Error;

use crate::scheduler::SchedulerState;

/// Errors raised while driving the engine.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// The engine failed to step or changed shape.
    #[error("engine failure: {0}")]
    Engine(#[from] EngineError),

    /// The engine's buffers could not be bound as views.
    #[error("inconsistent engine buffers: {0}")]
    View(#[from] ViewError),

    /// A frame could not be painted.
    #[error("render failure: {0}")]
    Render(#[from] RenderError),

    /// The operation is not allowed in the current state.
    #[error("cannot {operation} while {state}")]
    InvalidState {
        /// Current state.
        state: SchedulerState,
        /// What was attempted.
        operation: &'static str,
    },

    /// Pacing parameters are unusable.
    #[error("invalid scheduler settings: {reason}")]
    InvalidSettings {
        /// What was wrong.
        reason: String,
    },
}

/// Result type for scheduler operations.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Errors raised while loading the viewer configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {}", path.display(), source)]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid config: {reason}")]
    Invalid {
        /// What was wrong.
        reason: String,
    },
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
