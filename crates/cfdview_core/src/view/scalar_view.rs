//! Zero-copy views over flat per-cell arrays.

use std::marker::PhantomData;
use std::mem::size_of;

use bytemuck::Pod;

use crate::error::ViewResult;
use crate::grid::Grid;

use super::Region;

/// Zero-copy view into a flat array with one `T` per cell.
///
/// Element size is `size_of::<T>()`: 4 bytes for pressure (`f32`), 1 byte
/// for the obstacle flag (`u8`). The engine's array may sit at any
/// alignment; elements are decoded unaligned.
#[derive(Clone, Copy, Debug)]
pub struct ScalarView<'a, T> {
    bytes: &'a [u8],
    grid: Grid,
    _element: PhantomData<T>,
}

impl<'a, T: Pod> ScalarView<'a, T> {
    /// Size of one element in bytes.
    pub const ELEMENT_SIZE: usize = size_of::<T>();

    /// Binds a view to `region`.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` if the region holds fewer than
    /// `width * height` elements.
    pub fn new(array: &'static str, region: Region<'a>, grid: Grid) -> ViewResult<Self> {
        let bytes = region.take(array, grid.cell_count() * Self::ELEMENT_SIZE)?;
        Ok(Self {
            bytes,
            grid,
            _element: PhantomData,
        })
    }

    /// Reads the element at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the coordinate is outside the grid.
    #[inline]
    pub fn read(&self, row: u32, col: u32) -> ViewResult<T> {
        let index = self.grid.index(row, col)?;
        Ok(self.decode(index))
    }

    /// Reads the element at a row-major index, `None` past the end.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        (index < self.grid.cell_count()).then(|| self.decode(index))
    }

    /// Iterates all elements in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.bytes
            .chunks_exact(Self::ELEMENT_SIZE)
            .map(bytemuck::pod_read_unaligned)
    }

    #[inline]
    fn decode(&self, index: usize) -> T {
        let start = index * Self::ELEMENT_SIZE;
        bytemuck::pod_read_unaligned(&self.bytes[start..start + Self::ELEMENT_SIZE])
    }
}
