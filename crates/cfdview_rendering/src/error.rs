//! # Render Error Types

use cfdview_core::{Grid, Schema, ViewError};
use thiserror::Error;

/// Errors that can occur while painting a frame.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Reading a cell through the views failed.
    #[error(transparent)]
    View(#[from] ViewError),

    /// The renderer was built for a different schema than the views.
    #[error("renderer expects {expected} views, got {actual}")]
    SchemaMismatch {
        /// Schema the renderer committed to.
        expected: Schema,
        /// Schema of the views passed in.
        actual: Schema,
    },

    /// The views cover a different grid than the renderer.
    #[error("renderer grid {expected:?} does not match view grid {actual:?}")]
    GridMismatch {
        /// Grid the renderer was built for.
        expected: Grid,
        /// Grid of the views passed in.
        actual: Grid,
    },

    /// Cell size of zero pixels.
    #[error("cell size must be at least one pixel")]
    ZeroCellSize,

    /// The canvas for this grid and cell size does not fit in `u32` pixels.
    #[error("canvas for grid {grid:?} at cell size {cell_size} overflows")]
    CanvasTooLarge {
        /// Grid being drawn.
        grid: Grid,
        /// Requested cell size.
        cell_size: u32,
    },

    /// The surface cannot hold the whole grid.
    #[error("surface is {width}x{height}, frame needs {required_width}x{required_height}")]
    SurfaceTooSmall {
        /// Surface width.
        width: u32,
        /// Surface height.
        height: u32,
        /// Required width.
        required_width: u32,
        /// Required height.
        required_height: u32,
    },

    /// Encoding or writing an image failed.
    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
