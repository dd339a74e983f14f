//! In-memory RGB raster.

use std::path::Path;

use image::RgbImage;

use super::RasterSurface;
use crate::color::Rgb;
use crate::error::RenderResult;

/// Owned RGB raster implementing [`RasterSurface`].
///
/// Fills are clipped to the buffer. Paths carry no geometry here, so
/// `begin_path` / `stroke` only count brackets.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    fill: Rgb,
    stroke: Rgb,
    open_paths: u32,
    strokes: u64,
}

impl PixelBuffer {
    /// Creates a buffer cleared to `background`.
    #[must_use]
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
            fill: Rgb::BLACK,
            stroke: Rgb::BLACK,
            open_paths: 0,
            strokes: 0,
        }
    }

    /// Color at `(x, y)`, `None` outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// All pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Raw `rgb` bytes, row-major.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Current stroke color.
    #[must_use]
    pub const fn stroke_color(&self) -> Rgb {
        self.stroke
    }

    /// Number of completed `begin_path` / `stroke` brackets.
    #[must_use]
    pub const fn strokes(&self) -> u64 {
        self.strokes
    }

    /// Copies the buffer into an `image` raster.
    #[must_use]
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let Rgb { r, g, b } = self.pixels[y as usize * self.width as usize + x as usize];
            image::Rgb([r, g, b])
        })
    }

    /// Writes the buffer as a PNG file.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Image` if encoding or writing fails.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

impl RasterSurface for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        self.stroke = color;
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        if x >= x_end || y >= y_end {
            return;
        }

        let stride = self.width as usize;
        for row in y as usize..y_end as usize {
            let start = row * stride;
            self.pixels[start + x as usize..start + x_end as usize].fill(self.fill);
        }
    }

    fn begin_path(&mut self) {
        self.open_paths += 1;
    }

    fn stroke(&mut self) {
        if self.open_paths > 0 {
            self.open_paths -= 1;
            self.strokes += 1;
        }
    }
}
