//! # View Error Types
//!
//! All errors that can occur while binding or reading buffer views.

use thiserror::Error;

use crate::layout::Schema;
use crate::view::ScalarKind;

/// Errors that can occur in the buffer view layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// A grid dimension was zero.
    #[error("grid must be non-empty, got {width}x{height}")]
    EmptyGrid {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A cell coordinate fell outside the grid.
    #[error("cell ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfRange {
        /// Requested row.
        row: u32,
        /// Requested column.
        col: u32,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },

    /// The requested array does not exist under the active schema.
    #[error("{requested} array is not part of the {schema} schema")]
    SchemaMismatch {
        /// The schema the views were bound with.
        schema: Schema,
        /// The array that was asked for.
        requested: ScalarKind,
    },

    /// The engine did not expose an array the schema requires.
    #[error("engine did not expose the {0} array")]
    MissingArray(ScalarKind),

    /// A region is too short for the grid and stride it was bound with.
    #[error("{array} region holds {available} bytes, {required} required")]
    LengthMismatch {
        /// Name of the array.
        array: &'static str,
        /// Bytes needed for `width * height` elements.
        required: usize,
        /// Bytes available past the base offset.
        available: usize,
    },

    /// A record layout is internally inconsistent.
    #[error("invalid {schema} layout: {reason}")]
    InvalidLayout {
        /// Schema of the offending layout.
        schema: Schema,
        /// What is wrong with it.
        reason: String,
    },
}

/// Result type for view operations.
pub type ViewResult<T> = Result<T, ViewError>;
