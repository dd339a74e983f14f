//! # Cell Record
//!
//! The solver stores its velocity field as packed records whose bytes are
//! handed to the viewer unchanged, so the struct layout *is* the wire
//! format:
//!
//! ```text
//! ┌───────┬─────────┬────────────┬────────────┬──────────┬─────┐
//! │ alive │ pad × 3 │ velocity_x │ velocity_y │ tag × 3  │ pad │
//! │  u8   │         │    f32     │    f32     │          │     │
//! └───────┴─────────┴────────────┴────────────┴──────────┴─────┘
//!   0       1         4            8            12         15
//! ```

use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};
use cfdview_core::RichLayout;

/// One grid cell of the velocity field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Cell {
    /// Non-zero for live cells. The solver marks every cell live.
    pub alive: u8,
    _pad: [u8; 3],
    /// Horizontal velocity.
    pub velocity_x: f32,
    /// Vertical velocity.
    pub velocity_y: f32,
    /// Annotation bytes, always zero in this solver.
    pub tag: [u8; 3],
    _pad_tail: u8,
}

// The viewer decodes these bytes with RichLayout::STANDARD.
const _: () = {
    let layout = RichLayout::STANDARD;
    assert!(size_of::<Cell>() == layout.stride);
    assert!(offset_of!(Cell, alive) == layout.alive.offset);
    assert!(offset_of!(Cell, velocity_x) == layout.velocity_x.offset);
    assert!(offset_of!(Cell, velocity_y) == layout.velocity_y.offset);
    assert!(offset_of!(Cell, tag) == layout.tag.offset);
};

impl Cell {
    /// A live cell moving at `(velocity_x, velocity_y)`.
    #[inline]
    #[must_use]
    pub const fn fluid(velocity_x: f32, velocity_y: f32) -> Self {
        Self {
            alive: 1,
            _pad: [0; 3],
            velocity_x,
            velocity_y,
            tag: [0; 3],
            _pad_tail: 0,
        }
    }

    /// Returns true if the cell is live.
    #[inline]
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive != 0
    }

    /// Velocity as `(x, y)`.
    #[inline]
    #[must_use]
    pub const fn velocity(&self) -> (f32, f32) {
        (self.velocity_x, self.velocity_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_match_rich_layout() {
        let cell = Cell::fluid(1.5, -2.0);
        let bytes = bytemuck::bytes_of(&cell);
        assert_eq!(bytes.len(), 16);
        assert_eq!(bytes[0], 1);
        assert_eq!(&bytes[4..8], &1.5f32.to_ne_bytes());
        assert_eq!(&bytes[8..12], &(-2.0f32).to_ne_bytes());
        assert_eq!(&bytes[12..16], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_default_is_dead_and_still() {
        let cell = Cell::default();
        assert!(!cell.is_alive());
        assert_eq!(cell.velocity(), (0.0, 0.0));
    }
}
