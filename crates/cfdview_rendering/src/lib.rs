//! # CFDVIEW Rendering
//!
//! Turns decoded cell fields into pixels.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      FRAME PIPELINE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  FrameViews → FrameRenderer ─┬─ rich:   rich_color()         │
//! │                              └─ legacy: legacy_shade()       │
//! │                    ↓                                          │
//! │  RasterSurface: begin_path → fill_rect × (w*h) → stroke       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Color transfer (rich)
//!
//! - Obstacles are opaque black
//! - Pressure picks the hue: blue ← cyan ← white → yellow → red
//! - Speed picks the brightness: 50% when still, 100% at saturation

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod color;
pub mod error;
pub mod pipeline;
pub mod surface;

pub use color::{legacy_shade, rich_color, ColorScale, GrayShade, Rgb};
pub use error::{RenderError, RenderResult};
pub use pipeline::{CanvasGeometry, FrameRenderer, FrameStats, PixelRect};
pub use surface::{PixelBuffer, RasterSurface};
