//! # CFDVIEW Core
//!
//! The decoding contract between a grid-based flow solver and its viewer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 ENGINE MEMORY (not ours)                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  cells:    [record; w*h]   stride 16 (rich) / 6 (legacy)     │
//! │  pressure: [f32; w*h]      rich only                         │
//! │  obstacle: [u8;  w*h]      rich only                         │
//! └─────────────────────────────────────────────────────────────┘
//!                  │ borrowed for one tick
//!                  ▼
//!         FrameViews::bind(buffers, grid, layout)
//!                  │
//!                  ▼
//!     read_cell_at / read_scalar_array_at
//! ```
//!
//! ## Rules
//!
//! 1. **Zero copy** - views decode straight out of the engine's bytes
//! 2. **One tick lifetime** - views borrow the engine, so a step cannot
//!    happen while a view is alive
//! 3. **Fail fast** - schema mismatches and out-of-range reads are errors

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod engine;
pub mod error;
pub mod grid;
pub mod layout;
pub mod view;

pub use engine::{EngineError, EngineResult, SimulationEngine};
pub use error::{ViewError, ViewResult};
pub use grid::Grid;
pub use layout::{FieldSpec, LegacyLayout, RichLayout, Schema, SchemaLayout};
pub use view::{
    CellFields, EngineBuffers, FrameViews, LegacyCell, LegacyCellView, Region, RichCell,
    RichCellView, RichViews, ScalarKind, ScalarView,
};
