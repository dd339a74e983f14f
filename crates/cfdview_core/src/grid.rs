//! Grid shape and row-major indexing.

use crate::error::{ViewError, ViewResult};

/// Immutable grid shape.
///
/// Cells are addressed row-major: `idx(row, col) = row * width + col`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u32,
    height: u32,
}

impl Grid {
    /// Creates a grid.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::EmptyGrid`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> ViewResult<Self> {
        if width == 0 || height == 0 {
            return Err(ViewError::EmptyGrid { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn height(self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the row-major index of `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::OutOfRange`] if the coordinate is outside the grid.
    #[inline]
    pub fn index(self, row: u32, col: u32) -> ViewResult<usize> {
        if row >= self.height || col >= self.width {
            return Err(ViewError::OutOfRange {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(row as usize * self.width as usize + col as usize)
    }

    /// Iterates `(row, col)` pairs, row outer, column inner.
    pub fn cells(self) -> impl Iterator<Item = (u32, u32)> {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| (row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_row_major() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.index(0, 0), Ok(0));
        assert_eq!(grid.index(0, 3), Ok(3));
        assert_eq!(grid.index(1, 0), Ok(4));
        assert_eq!(grid.index(2, 3), Ok(11));
        assert_eq!(grid.cell_count(), 12);
    }

    #[test]
    fn test_out_of_range_never_wraps() {
        let grid = Grid::new(4, 3).unwrap();
        assert!(matches!(grid.index(0, 4), Err(ViewError::OutOfRange { .. })));
        assert!(matches!(grid.index(3, 0), Err(ViewError::OutOfRange { .. })));
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert_eq!(
            Grid::new(0, 5),
            Err(ViewError::EmptyGrid { width: 0, height: 5 })
        );
    }

    #[test]
    fn test_cells_order() {
        let grid = Grid::new(2, 2).unwrap();
        let order: Vec<_> = grid.cells().collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
