use std::ops::{Index, IndexMut, Range};

use misc::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{expect_in_range, Axis, GridError, GridResult};
use crate::grid_impl::{self, Grid};
use crate::row::{Row, RowMut};

const AXES: [Axis; 2] = [Axis::Y, Axis::X];

/// Fixed-size owned 2D grid, stored row-major. Coordinates are (y, x)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid2D<T>")]
pub struct Grid2D<T> {
    y_size: usize,
    x_size: usize,
    data: Box<[T]>,
}

#[derive(Deserialize)]
struct RawGrid2D<T> {
    y_size: usize,
    x_size: usize,
    data: Vec<T>,
}

impl<T> Grid2D<T> {
    /// 1x1 grid
    pub fn from_value(value: T) -> Self {
        Self {
            y_size: 1,
            x_size: 1,
            data: Box::new([value]),
        }
    }

    pub fn new(y_size: usize, x_size: usize) -> GridResult<Self>
    where
        T: Default,
    {
        let data = grid_impl::alloc_default([y_size, x_size], AXES)?;
        Ok(Self {
            y_size,
            x_size,
            data,
        })
    }

    pub fn filled(y_size: usize, x_size: usize, value: T) -> GridResult<Self>
    where
        T: Clone,
    {
        let data = grid_impl::alloc_filled([y_size, x_size], AXES, value)?;
        Ok(Self {
            y_size,
            x_size,
            data,
        })
    }

    /// Takes a row-major buffer of exactly `y_size * x_size` elements
    pub fn from_vec(y_size: usize, x_size: usize, data: Vec<T>) -> GridResult<Self> {
        let data = grid_impl::adopt_vec([y_size, x_size], AXES, data)?;
        Ok(Self {
            y_size,
            x_size,
            data,
        })
    }

    /// Caller guarantees the buffer matches the extents
    pub(crate) fn from_parts(y_size: usize, x_size: usize, data: Box<[T]>) -> Self {
        debug_assert_eq!(data.len(), y_size * x_size);
        Self {
            y_size,
            x_size,
            data,
        }
    }

    pub fn y_size(&self) -> usize {
        self.y_size
    }

    pub fn x_size(&self) -> usize {
        self.x_size
    }

    pub fn get(&self, y: usize, x: usize) -> GridResult<&T> {
        self.cell((y, x))
    }

    pub fn get_mut(&mut self, y: usize, x: usize) -> GridResult<&mut T> {
        self.cell_mut((y, x))
    }

    /// Checks `y` before handing out a view of the row, which checks `x` itself
    pub fn row(&self, y: usize) -> GridResult<Row<'_, T>> {
        let range = self.row_range(y)?;
        Ok(Row::new(&self.data[range], y))
    }

    pub fn row_mut(&mut self, y: usize) -> GridResult<RowMut<'_, T>> {
        let range = self.row_range(y)?;
        Ok(RowMut::new(&mut self.data[range], y))
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row<'_, T>> + '_ {
        // chunk size can't be 0 but the empty grid has no elements anyway
        self.data
            .chunks_exact(self.x_size.max(1))
            .enumerate()
            .map(|(y, cells)| Row::new(cells, y))
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = ((usize, usize), &T)> + '_ {
        (0..self.y_size)
            .cartesian_product(0..self.x_size)
            .zip(self.data.iter())
    }

    pub fn iter_coords_mut(&mut self) -> impl Iterator<Item = ((usize, usize), &mut T)> + '_ {
        (0..self.y_size)
            .cartesian_product(0..self.x_size)
            .zip(self.data.iter_mut())
    }

    /// Moves the buffer out in constant time, leaving this grid empty
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    fn row_range(&self, y: usize) -> GridResult<Range<usize>> {
        if y < self.y_size {
            let start = y * self.x_size;
            Ok(start..start + self.x_size)
        } else {
            Err(GridError::OutOfRange {
                axis: Axis::Y,
                index: y,
                extent: self.y_size,
            })
        }
    }
}

impl<T> Grid for Grid2D<T> {
    type Item = T;
    type Coord = (usize, usize);
    type Dims = [usize; 2];

    /// [y, x]
    fn dimensions(&self) -> [usize; 2] {
        [self.y_size, self.x_size]
    }

    fn array(&self) -> &[T] {
        &self.data
    }

    fn array_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    fn flatten(&self, (y, x): (usize, usize)) -> GridResult<usize> {
        grid_impl::flatten_coords(self.dimensions(), [y, x], AXES)
    }

    fn unflatten(&self, index: usize) -> Option<(usize, usize)> {
        grid_impl::unflatten_index(self.dimensions(), index).map(|[y, x]| (y, x))
    }
}

/// The empty state, as left behind by [Grid2D::take]
impl<T> Default for Grid2D<T> {
    fn default() -> Self {
        Self {
            y_size: 0,
            x_size: 0,
            data: Box::new([]),
        }
    }
}

impl<T> TryFrom<RawGrid2D<T>> for Grid2D<T> {
    type Error = GridError;

    fn try_from(raw: RawGrid2D<T>) -> Result<Self, Self::Error> {
        Self::from_vec(raw.y_size, raw.x_size, raw.data)
    }
}

impl<T> Index<(usize, usize)> for Grid2D<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, (y, x): (usize, usize)) -> &Self::Output {
        expect_in_range(self.get(y, x))
    }
}

impl<T> IndexMut<(usize, usize)> for Grid2D<T> {
    #[track_caller]
    fn index_mut(&mut self, (y, x): (usize, usize)) -> &mut Self::Output {
        expect_in_range(self.get_mut(y, x))
    }
}

/// `grid[y]` is the row's cells, so `grid[y][x]` is the same cell as `grid[(y, x)]`
impl<T> Index<usize> for Grid2D<T> {
    type Output = [T];

    #[track_caller]
    fn index(&self, y: usize) -> &Self::Output {
        expect_in_range(self.row(y)).into_slice()
    }
}

impl<T> IndexMut<usize> for Grid2D<T> {
    #[track_caller]
    fn index_mut(&mut self, y: usize) -> &mut Self::Output {
        expect_in_range(self.row_mut(y)).into_slice()
    }
}

impl<T> AsRef<[T]> for Grid2D<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}
