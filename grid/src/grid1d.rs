use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::{expect_in_range, Axis, GridError, GridResult};
use crate::grid_impl::{self, Grid};

const AXES: [Axis; 1] = [Axis::X];

/// Fixed-size owned 1D buffer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid1D<T>")]
pub struct Grid1D<T> {
    size: usize,
    data: Box<[T]>,
}

#[derive(Deserialize)]
struct RawGrid1D<T> {
    size: usize,
    data: Vec<T>,
}

impl<T> Grid1D<T> {
    /// Single element grid
    pub fn from_value(value: T) -> Self {
        Self {
            size: 1,
            data: Box::new([value]),
        }
    }

    pub fn new(size: usize) -> GridResult<Self>
    where
        T: Default,
    {
        let data = grid_impl::alloc_default([size], AXES)?;
        Ok(Self { size, data })
    }

    pub fn filled(size: usize, value: T) -> GridResult<Self>
    where
        T: Clone,
    {
        let data = grid_impl::alloc_filled([size], AXES, value)?;
        Ok(Self { size, data })
    }

    pub fn from_vec(data: Vec<T>) -> GridResult<Self> {
        let size = data.len();
        let data = grid_impl::adopt_vec([size], AXES, data)?;
        Ok(Self { size, data })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, index: usize) -> GridResult<&T> {
        self.cell(index)
    }

    pub fn get_mut(&mut self, index: usize) -> GridResult<&mut T> {
        self.cell_mut(index)
    }

    /// Moves the buffer out in constant time, leaving this grid empty
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl<T> Grid for Grid1D<T> {
    type Item = T;
    type Coord = usize;
    type Dims = usize;

    fn dimensions(&self) -> usize {
        self.size
    }

    fn array(&self) -> &[T] {
        &self.data
    }

    fn array_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    fn flatten(&self, index: usize) -> GridResult<usize> {
        grid_impl::flatten_coords([self.size], [index], AXES)
    }

    fn unflatten(&self, index: usize) -> Option<usize> {
        (index < self.size).then_some(index)
    }
}

/// The empty state, as left behind by [Grid1D::take]
impl<T> Default for Grid1D<T> {
    fn default() -> Self {
        Self {
            size: 0,
            data: Box::new([]),
        }
    }
}

impl<T> TryFrom<RawGrid1D<T>> for Grid1D<T> {
    type Error = GridError;

    fn try_from(raw: RawGrid1D<T>) -> Result<Self, Self::Error> {
        let grid = Self::from_vec(raw.data)?;
        if grid.size != raw.size {
            return Err(GridError::BufferLength {
                expected: raw.size,
                actual: grid.size,
            });
        }

        Ok(grid)
    }
}

impl<T> Index<usize> for Grid1D<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output {
        expect_in_range(self.get(index))
    }
}

impl<T> IndexMut<usize> for Grid1D<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        expect_in_range(self.get_mut(index))
    }
}

impl<T> AsRef<[T]> for Grid1D<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}
