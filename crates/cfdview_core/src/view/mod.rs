//! # Buffer Views
//!
//! Named views with a fixed stride and offset over engine-owned memory.
//!
//! The viewer never copies simulation state. Each tick it borrows the
//! engine's regions, binds a [`FrameViews`] to them and decodes fields on
//! demand:
//! 1. `RichCellView` / `LegacyCellView` - packed cell records
//! 2. `ScalarView<f32>` - pressure, one per cell
//! 3. `ScalarView<u8>` - obstacle flag, one per cell
//!
//! Views borrow the engine immutably. Stepping the engine needs a mutable
//! borrow, so no view can survive into the next step.

mod decode;
mod record_view;
mod scalar_view;

use std::fmt;

pub use record_view::{LegacyCell, LegacyCellView, RichCell, RichCellView};
pub use scalar_view::ScalarView;

use crate::error::{ViewError, ViewResult};
use crate::grid::Grid;
use crate::layout::{Schema, SchemaLayout};

/// A byte region inside a larger memory, starting at `base_offset`.
///
/// Mirrors what a foreign engine hands out: one linear memory plus the
/// offset at which an array begins.
#[derive(Clone, Copy, Debug)]
pub struct Region<'a> {
    memory: &'a [u8],
    base_offset: usize,
}

impl<'a> Region<'a> {
    /// A region starting `base_offset` bytes into `memory`.
    #[must_use]
    pub const fn new(memory: &'a [u8], base_offset: usize) -> Self {
        Self {
            memory,
            base_offset,
        }
    }

    /// A region covering all of `bytes`.
    #[must_use]
    pub const fn whole(bytes: &'a [u8]) -> Self {
        Self::new(bytes, 0)
    }

    /// Bytes available past the base offset.
    #[must_use]
    pub const fn available(&self) -> usize {
        self.memory.len().saturating_sub(self.base_offset)
    }

    /// Takes exactly `len` bytes from the base offset.
    fn take(self, array: &'static str, len: usize) -> ViewResult<&'a [u8]> {
        let available = self.available();
        if available < len {
            return Err(ViewError::LengthMismatch {
                array,
                required: len,
                available,
            });
        }
        Ok(&self.memory[self.base_offset..self.base_offset + len])
    }
}

/// Regions an engine exposes for the current tick.
///
/// Valid only until the engine's next step.
#[derive(Clone, Copy, Debug)]
pub struct EngineBuffers<'a> {
    /// Packed cell records.
    pub cells: Region<'a>,
    /// Pressure array (rich schema).
    pub pressure: Option<Region<'a>>,
    /// Obstacle flag array (rich schema).
    pub obstacle: Option<Region<'a>>,
}

impl<'a> EngineBuffers<'a> {
    /// Buffers for a rich-schema engine.
    #[must_use]
    pub const fn rich(cells: Region<'a>, pressure: Region<'a>, obstacle: Region<'a>) -> Self {
        Self {
            cells,
            pressure: Some(pressure),
            obstacle: Some(obstacle),
        }
    }

    /// Buffers for a legacy-schema engine.
    #[must_use]
    pub const fn legacy(cells: Region<'a>) -> Self {
        Self {
            cells,
            pressure: None,
            obstacle: None,
        }
    }
}

/// Auxiliary per-cell arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Pressure, `f32`.
    Pressure,
    /// Obstacle flag, `u8`.
    Obstacle,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pressure => f.write_str("pressure"),
            Self::Obstacle => f.write_str("obstacle"),
        }
    }
}

/// Decoded fields of one cell, per schema.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellFields {
    /// Rich record.
    Rich(RichCell),
    /// Legacy record.
    Legacy(LegacyCell),
}

/// Views for a rich-schema frame.
#[derive(Clone, Copy, Debug)]
pub struct RichViews<'a> {
    /// Cell records.
    pub cells: RichCellView<'a>,
    /// Pressure per cell.
    pub pressure: ScalarView<'a, f32>,
    /// Obstacle flag per cell.
    pub obstacle: ScalarView<'a, u8>,
}

/// All views for one frame, bound under a single schema.
#[derive(Clone, Copy, Debug)]
pub enum FrameViews<'a> {
    /// Rich schema.
    Rich(RichViews<'a>),
    /// Legacy schema.
    Legacy(LegacyCellView<'a>),
}

impl<'a> FrameViews<'a> {
    /// Binds fresh views over `buffers`.
    ///
    /// # Errors
    ///
    /// - `MissingArray` if a rich engine did not expose pressure or obstacle
    /// - `LengthMismatch` if any region is too short for the grid
    /// - `InvalidLayout` if the layout is inconsistent
    pub fn bind(buffers: &EngineBuffers<'a>, grid: Grid, layout: &SchemaLayout) -> ViewResult<Self> {
        match *layout {
            SchemaLayout::Rich(rich) => {
                let pressure = buffers
                    .pressure
                    .ok_or(ViewError::MissingArray(ScalarKind::Pressure))?;
                let obstacle = buffers
                    .obstacle
                    .ok_or(ViewError::MissingArray(ScalarKind::Obstacle))?;
                Ok(Self::Rich(RichViews {
                    cells: RichCellView::new(buffers.cells, grid, rich)?,
                    pressure: ScalarView::new("pressure", pressure, grid)?,
                    obstacle: ScalarView::new("obstacle", obstacle, grid)?,
                }))
            }
            SchemaLayout::Legacy(legacy) => Ok(Self::Legacy(LegacyCellView::new(
                buffers.cells,
                grid,
                legacy,
            )?)),
        }
    }

    /// Schema these views decode.
    #[must_use]
    pub const fn schema(&self) -> Schema {
        match self {
            Self::Rich(_) => Schema::Rich,
            Self::Legacy(_) => Schema::Legacy,
        }
    }

    /// Grid the views were bound with.
    #[must_use]
    pub const fn grid(&self) -> Grid {
        match self {
            Self::Rich(views) => views.cells.grid(),
            Self::Legacy(view) => view.grid(),
        }
    }

    /// Reads the cell record at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the coordinate is outside the grid.
    pub fn read_cell_at(&self, row: u32, col: u32) -> ViewResult<CellFields> {
        match self {
            Self::Rich(views) => views.cells.read(row, col).map(CellFields::Rich),
            Self::Legacy(view) => view.read(row, col).map(CellFields::Legacy),
        }
    }

    /// Reads an auxiliary array at `(row, col)`.
    ///
    /// Obstacle reads as `1.0` or `0.0`.
    ///
    /// # Errors
    ///
    /// - `SchemaMismatch` under the legacy schema
    /// - `OutOfRange` if the coordinate is outside the grid
    pub fn read_scalar_array_at(&self, kind: ScalarKind, row: u32, col: u32) -> ViewResult<f32> {
        let views = self.rich(kind)?;
        match kind {
            ScalarKind::Pressure => views.pressure.read(row, col),
            ScalarKind::Obstacle => views
                .obstacle
                .read(row, col)
                .map(|flag| if flag != 0 { 1.0 } else { 0.0 }),
        }
    }

    /// Reads the obstacle flag at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Same as [`FrameViews::read_scalar_array_at`].
    pub fn is_obstacle_at(&self, row: u32, col: u32) -> ViewResult<bool> {
        let views = self.rich(ScalarKind::Obstacle)?;
        views.obstacle.read(row, col).map(|flag| flag != 0)
    }

    fn rich(&self, requested: ScalarKind) -> ViewResult<&RichViews<'a>> {
        match self {
            Self::Rich(views) => Ok(views),
            Self::Legacy(_) => Err(ViewError::SchemaMismatch {
                schema: Schema::Legacy,
                requested,
            }),
        }
    }
}
