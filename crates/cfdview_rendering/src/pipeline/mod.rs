//! Frame renderer.
//!
//! Walks the grid row-major and paints one rectangle per cell. Nothing is
//! kept between frames: each call repaints the whole grid from the views
//! it is handed.

mod frame;
mod stats;

pub use frame::{CanvasGeometry, PixelRect};
pub use stats::FrameStats;

use std::time::Instant;

use cfdview_core::{FrameViews, Grid, LegacyCellView, RichViews, Schema};

use crate::color::{legacy_shade, rich_color, ColorScale, Rgb};
use crate::error::{RenderError, RenderResult};
use crate::surface::RasterSurface;

/// Paints decoded frames onto a raster surface.
///
/// Commits to one schema for its whole lifetime.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    geometry: CanvasGeometry,
    schema: Schema,
    scale: ColorScale,
    frame_count: u64,
    stats: FrameStats,
}

impl FrameRenderer {
    /// Creates a renderer for `grid` under `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ZeroCellSize`] if `cell_size` is zero.
    pub fn new(grid: Grid, cell_size: u32, schema: Schema, scale: ColorScale) -> RenderResult<Self> {
        Ok(Self {
            geometry: CanvasGeometry::new(grid, cell_size)?,
            schema,
            scale,
            frame_count: 0,
            stats: FrameStats::default(),
        })
    }

    /// Canvas geometry.
    #[must_use]
    pub const fn geometry(&self) -> &CanvasGeometry {
        &self.geometry
    }

    /// Schema this renderer draws.
    #[must_use]
    pub const fn schema(&self) -> Schema {
        self.schema
    }

    /// Statistics of the last frame.
    #[must_use]
    pub const fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Frames rendered so far.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Paints one frame.
    ///
    /// # Errors
    ///
    /// - `SchemaMismatch` / `GridMismatch` if the views do not match this renderer
    /// - `SurfaceTooSmall` if the surface cannot hold the canvas
    /// - `View` if a cell read fails
    pub fn render<S: RasterSurface>(
        &mut self,
        views: &FrameViews<'_>,
        surface: &mut S,
    ) -> RenderResult<FrameStats> {
        self.check_compatible(views, surface)?;

        let start = Instant::now();
        let mut stats = FrameStats {
            frame_number: self.frame_count + 1,
            ..FrameStats::default()
        };

        surface.begin_path();
        match views {
            FrameViews::Rich(rich) => self.paint_rich(rich, surface, &mut stats)?,
            FrameViews::Legacy(legacy) => self.paint_legacy(legacy, surface, &mut stats)?,
        }
        surface.stroke();

        stats.paint_time_us = start.elapsed().as_micros() as u32;
        self.frame_count += 1;
        self.stats = stats;

        tracing::trace!(
            frame = stats.frame_number,
            cells = stats.cells_painted,
            paint_us = stats.paint_time_us,
            "frame painted"
        );

        Ok(stats)
    }

    fn check_compatible<S: RasterSurface>(&self, views: &FrameViews<'_>, surface: &S) -> RenderResult<()> {
        if views.schema() != self.schema {
            return Err(RenderError::SchemaMismatch {
                expected: self.schema,
                actual: views.schema(),
            });
        }
        if views.grid() != self.geometry.grid() {
            return Err(RenderError::GridMismatch {
                expected: self.geometry.grid(),
                actual: views.grid(),
            });
        }
        let (required_width, required_height) =
            (self.geometry.surface_width(), self.geometry.surface_height());
        if surface.width() < required_width || surface.height() < required_height {
            return Err(RenderError::SurfaceTooSmall {
                width: surface.width(),
                height: surface.height(),
                required_width,
                required_height,
            });
        }
        Ok(())
    }

    fn paint_rich<S: RasterSurface>(
        &self,
        views: &RichViews<'_>,
        surface: &mut S,
        stats: &mut FrameStats,
    ) -> RenderResult<()> {
        for (row, col) in self.geometry.grid().cells() {
            let color = if views.obstacle.read(row, col)? != 0 {
                stats.obstacle_cells += 1;
                Rgb::BLACK
            } else {
                let cell = views.cells.read(row, col)?;
                let pressure = views.pressure.read(row, col)?;
                rich_color(false, cell.velocity_x, cell.velocity_y, pressure, &self.scale)
            };
            self.paint_cell(surface, row, col, color);
            stats.cells_painted += 1;
        }
        Ok(())
    }

    fn paint_legacy<S: RasterSurface>(
        &self,
        view: &LegacyCellView<'_>,
        surface: &mut S,
        stats: &mut FrameStats,
    ) -> RenderResult<()> {
        for (row, col) in self.geometry.grid().cells() {
            let cell = view.read(row, col)?;
            let shade = legacy_shade(cell.velocity_x, cell.velocity_y);
            if !shade.in_gamut() {
                stats.out_of_gamut_cells += 1;
            }
            self.paint_cell(surface, row, col, shade.to_rgb());
            stats.cells_painted += 1;
        }
        Ok(())
    }

    #[inline]
    fn paint_cell<S: RasterSurface>(&self, surface: &mut S, row: u32, col: u32, color: Rgb) {
        let rect = self.geometry.cell_rect(row, col);
        surface.set_fill_color(color);
        surface.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }
}
