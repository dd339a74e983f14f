//! # Simulation Engine Contract
//!
//! The viewer never advances physics itself. An engine owns the grid state,
//! steps it, and lends out its memory for exactly one tick at a time.
//!
//! ```text
//! tick(&mut self)           ── mutates, may reallocate
//!     │
//! buffers(&self) ──► EngineBuffers<'_>  ── valid until the next tick()
//!     │
//! max_divergence / drag_coefficient ── as of the last tick()
//! ```

use thiserror::Error;

use crate::layout::SchemaLayout;
use crate::view::EngineBuffers;

/// Errors reported by an engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The engine could not advance its state.
    #[error("simulation step failed: {reason}")]
    StepFailed {
        /// Engine-provided description.
        reason: String,
    },

    /// The engine was given parameters it cannot run with.
    #[error("invalid engine configuration: {reason}")]
    InvalidConfig {
        /// What was wrong.
        reason: String,
    },

    /// The grid shape changed after construction.
    #[error("engine grid changed from {expected_width}x{expected_height} to {width}x{height}")]
    ShapeChanged {
        /// Width at construction.
        expected_width: u32,
        /// Height at construction.
        expected_height: u32,
        /// Width now reported.
        width: u32,
        /// Height now reported.
        height: u32,
    },
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// A grid simulation the viewer can drive.
pub trait SimulationEngine {
    /// Grid width, fixed for the engine's lifetime.
    fn width(&self) -> u32;

    /// Grid height, fixed for the engine's lifetime.
    fn height(&self) -> u32;

    /// Record layout of this engine build.
    fn layout(&self) -> SchemaLayout;

    /// Advances the simulation by one discrete step.
    ///
    /// # Errors
    ///
    /// Any error is fatal for the viewing session.
    fn tick(&mut self) -> EngineResult<()>;

    /// Memory regions for the current state.
    fn buffers(&self) -> EngineBuffers<'_>;

    /// Largest local divergence magnitude as of the last step.
    fn max_divergence(&self) -> f32;

    /// Drag coefficient on the obstacle as of the last step.
    fn drag_coefficient(&self) -> f32;
}
