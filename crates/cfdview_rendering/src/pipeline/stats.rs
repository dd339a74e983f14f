//! Rendering statistics.

/// Statistics from one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame number, starting at 1.
    pub frame_number: u64,
    /// Rectangles filled.
    pub cells_painted: u32,
    /// Cells drawn as obstacles.
    pub obstacle_cells: u32,
    /// Legacy cells whose shade fell outside `0..=255`.
    pub out_of_gamut_cells: u32,
    /// Time spent painting in microseconds.
    pub paint_time_us: u32,
}

impl FrameStats {
    /// Returns true if every cell of a `cell_count` grid was painted.
    #[must_use]
    pub const fn is_complete(&self, cell_count: usize) -> bool {
        self.cells_painted as usize == cell_count
    }
}
