//! Zero-copy views over packed cell records.

use crate::error::ViewResult;
use crate::grid::Grid;
use crate::layout::{LegacyLayout, RichLayout};

use super::decode::{read_flag, read_pod, read_u8};
use super::Region;

/// Decoded rich-schema record.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RichCell {
    /// Whether the cell participates in the fluid domain.
    pub alive: bool,
    /// Horizontal velocity.
    pub velocity_x: f32,
    /// Vertical velocity.
    pub velocity_y: f32,
    /// Reserved annotation bytes, unused by rendering.
    pub tag: [u8; 3],
}

/// Decoded legacy-schema record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LegacyCell {
    /// Whether the cell participates in the fluid domain.
    pub alive: bool,
    /// Horizontal velocity magnitude.
    pub velocity_x: u8,
    /// Vertical velocity magnitude.
    pub velocity_y: u8,
    /// Precomputed color bytes.
    pub color: [u8; 3],
}

/// Zero-copy view into rich cell records.
///
/// # Memory Layout
///
/// ```text
/// [alive, _pad x3, vx: f32, vy: f32, tag x3, _pad] × (width * height)
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RichCellView<'a> {
    /// Exactly `width * height * stride` bytes.
    bytes: &'a [u8],
    grid: Grid,
    layout: RichLayout,
}

impl<'a> RichCellView<'a> {
    /// Binds a view to `region`.
    ///
    /// # Errors
    ///
    /// Fails if the layout is invalid or the region is shorter than
    /// `width * height * stride` bytes.
    pub fn new(region: Region<'a>, grid: Grid, layout: RichLayout) -> ViewResult<Self> {
        layout.validate()?;
        let bytes = region.take("cells", grid.cell_count() * layout.stride)?;
        Ok(Self { bytes, grid, layout })
    }

    /// Reads the record at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the coordinate is outside the grid.
    #[inline]
    pub fn read(&self, row: u32, col: u32) -> ViewResult<RichCell> {
        let index = self.grid.index(row, col)?;
        Ok(self.decode(index))
    }

    /// Reads the record at a row-major index, `None` past the end.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<RichCell> {
        (index < self.grid.cell_count()).then(|| self.decode(index))
    }

    /// Grid this view was bound with.
    #[must_use]
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// The layout this view decodes with.
    #[must_use]
    pub const fn layout(&self) -> &RichLayout {
        &self.layout
    }

    /// Returns the total size in bytes.
    #[must_use]
    pub const fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    fn decode(&self, index: usize) -> RichCell {
        let start = index * self.layout.stride;
        let record = &self.bytes[start..start + self.layout.stride];
        RichCell {
            alive: read_flag(record, self.layout.alive),
            velocity_x: read_pod(record, self.layout.velocity_x),
            velocity_y: read_pod(record, self.layout.velocity_y),
            tag: read_pod(record, self.layout.tag),
        }
    }
}

/// Zero-copy view into legacy cell records.
#[derive(Clone, Copy, Debug)]
pub struct LegacyCellView<'a> {
    bytes: &'a [u8],
    grid: Grid,
    layout: LegacyLayout,
}

impl<'a> LegacyCellView<'a> {
    /// Binds a view to `region`.
    ///
    /// The region must hold `width * height * stride` bytes. A region sized
    /// with [`LegacyLayout::region_record_bytes`] instead is rejected.
    ///
    /// # Errors
    ///
    /// Fails if the layout is invalid or the region is too short.
    pub fn new(region: Region<'a>, grid: Grid, layout: LegacyLayout) -> ViewResult<Self> {
        layout.validate()?;
        let bytes = region.take("cells", grid.cell_count() * layout.stride)?;
        Ok(Self { bytes, grid, layout })
    }

    /// Reads the record at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the coordinate is outside the grid.
    #[inline]
    pub fn read(&self, row: u32, col: u32) -> ViewResult<LegacyCell> {
        let index = self.grid.index(row, col)?;
        Ok(self.decode(index))
    }

    /// Reads the record at a row-major index, `None` past the end.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<LegacyCell> {
        (index < self.grid.cell_count()).then(|| self.decode(index))
    }

    /// Grid this view was bound with.
    #[must_use]
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// The layout this view decodes with.
    #[must_use]
    pub const fn layout(&self) -> &LegacyLayout {
        &self.layout
    }

    fn decode(&self, index: usize) -> LegacyCell {
        let start = index * self.layout.stride;
        let record = &self.bytes[start..start + self.layout.stride];
        LegacyCell {
            alive: read_flag(record, self.layout.alive),
            velocity_x: read_u8(record, self.layout.velocity_x),
            velocity_y: read_u8(record, self.layout.velocity_y),
            color: read_pod(record, self.layout.color),
        }
    }
}
