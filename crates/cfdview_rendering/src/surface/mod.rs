//! Raster surface contract.
//!
//! The host owns the actual canvas. The renderer only needs a fill color,
//! filled rectangles, and a path bracket around each frame's fills.

mod pixel_buffer;

pub use pixel_buffer::PixelBuffer;

use crate::color::Rgb;

/// A 2-D raster drawing surface supplied by the host.
pub trait RasterSurface {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Sets the color used by subsequent fills.
    fn set_fill_color(&mut self, color: Rgb);

    /// Sets the color used by subsequent strokes.
    fn set_stroke_color(&mut self, color: Rgb);

    /// Fills a `width x height` rectangle with its top-left corner at `(x, y)`.
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32);

    /// Opens a path. Brackets the per-frame fills.
    fn begin_path(&mut self);

    /// Strokes the current path. Closes the per-frame bracket.
    fn stroke(&mut self);
}
