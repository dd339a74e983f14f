//! Canvas geometry.
//!
//! The canvas leaves room for a one-pixel border around every cell:
//!
//! ```text
//! canvas width  = (cell_size + 1) * grid width  + 1
//! canvas height = (cell_size + 1) * grid height + 1
//! cell (row, col) → rect at (col * cell_size + 1, row * cell_size + 1)
//! ```

use cfdview_core::Grid;

use crate::error::{RenderError, RenderResult};

/// Pixel rectangle on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Returns true if `(px, py)` lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Maps grid cells to surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasGeometry {
    grid: Grid,
    cell_size: u32,
}

impl CanvasGeometry {
    /// Geometry for `grid` with square cells of `cell_size` pixels.
    ///
    /// # Errors
    ///
    /// - [`RenderError::ZeroCellSize`] if `cell_size` is zero
    /// - [`RenderError::CanvasTooLarge`] if either canvas side overflows `u32`
    pub fn new(grid: Grid, cell_size: u32) -> RenderResult<Self> {
        if cell_size == 0 {
            return Err(RenderError::ZeroCellSize);
        }
        if canvas_side(cell_size, grid.width()).is_none()
            || canvas_side(cell_size, grid.height()).is_none()
        {
            return Err(RenderError::CanvasTooLarge { grid, cell_size });
        }
        Ok(Self { grid, cell_size })
    }

    /// Grid being drawn.
    #[must_use]
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// Side length of one cell in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Required surface width.
    #[must_use]
    pub const fn surface_width(&self) -> u32 {
        (self.cell_size + 1) * self.grid.width() + 1
    }

    /// Required surface height.
    #[must_use]
    pub const fn surface_height(&self) -> u32 {
        (self.cell_size + 1) * self.grid.height() + 1
    }

    /// Rectangle painted for `(row, col)`.
    #[must_use]
    pub const fn cell_rect(&self, row: u32, col: u32) -> PixelRect {
        PixelRect {
            x: col * self.cell_size + 1,
            y: row * self.cell_size + 1,
            width: self.cell_size,
            height: self.cell_size,
        }
    }
}

fn canvas_side(cell_size: u32, cells: u32) -> Option<u32> {
    cell_size.checked_add(1)?.checked_mul(cells)?.checked_add(1)
}
