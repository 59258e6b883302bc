use std::ops::{Index, IndexMut, Range};

use misc::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{expect_in_range, Axis, GridError, GridResult};
use crate::grid2d::Grid2D;
use crate::grid_impl::{self, Grid};

const AXES: [Axis; 3] = [Axis::Z, Axis::Y, Axis::X];

/// Fixed-size owned 3D grid, stored as consecutive z layers of row-major (y, x) cells.
/// Coordinates are (z, y, x).
///
/// Unlike the lower dimensions there is no single value constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid3D<T>")]
pub struct Grid3D<T> {
    z_size: usize,
    y_size: usize,
    x_size: usize,
    data: Box<[T]>,
}

#[derive(Deserialize)]
struct RawGrid3D<T> {
    z_size: usize,
    y_size: usize,
    x_size: usize,
    data: Vec<T>,
}

/// Selection of z layers
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordRange {
    All,
    Single(usize),
    /// [from..to)
    Range(usize, usize),
}

impl<T> Grid3D<T> {
    pub fn new(z_size: usize, y_size: usize, x_size: usize) -> GridResult<Self>
    where
        T: Default,
    {
        let data = grid_impl::alloc_default([z_size, y_size, x_size], AXES)?;
        Ok(Self {
            z_size,
            y_size,
            x_size,
            data,
        })
    }

    pub fn filled(z_size: usize, y_size: usize, x_size: usize, value: T) -> GridResult<Self>
    where
        T: Clone,
    {
        let data = grid_impl::alloc_filled([z_size, y_size, x_size], AXES, value)?;
        Ok(Self {
            z_size,
            y_size,
            x_size,
            data,
        })
    }

    pub fn from_vec(z_size: usize, y_size: usize, x_size: usize, data: Vec<T>) -> GridResult<Self> {
        let data = grid_impl::adopt_vec([z_size, y_size, x_size], AXES, data)?;
        Ok(Self {
            z_size,
            y_size,
            x_size,
            data,
        })
    }

    pub fn z_size(&self) -> usize {
        self.z_size
    }

    pub fn y_size(&self) -> usize {
        self.y_size
    }

    pub fn x_size(&self) -> usize {
        self.x_size
    }

    pub fn get(&self, z: usize, y: usize, x: usize) -> GridResult<&T> {
        self.cell((z, y, x))
    }

    pub fn get_mut(&mut self, z: usize, y: usize, x: usize) -> GridResult<&mut T> {
        self.cell_mut((z, y, x))
    }

    /// Span of layer `z` within the flat buffer
    pub fn slice_range(&self, z: usize) -> GridResult<Range<usize>> {
        self.check_z(z)?;
        let slice_size = self.y_size * self.x_size;
        let offset = z * slice_size;
        Ok(offset..offset + slice_size)
    }

    /// Copies layer `z` into a new independent 2D grid of shape (y_size, x_size)
    pub fn slice(&self, z: usize) -> GridResult<Grid2D<T>>
    where
        T: Clone,
    {
        let range = self.slice_range(z)?;
        let cells = self.data[range].to_vec().into_boxed_slice();
        Ok(Grid2D::from_parts(self.y_size, self.x_size, cells))
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = ((usize, usize, usize), &T)> + '_ {
        let (iter, start) = self.iter_coords_alone(0, self.z_size);
        iter.zip(self.data[start..].iter())
    }

    pub fn iter_coords_with_z_range(
        &self,
        z_range: CoordRange,
    ) -> GridResult<impl Iterator<Item = ((usize, usize, usize), &T)> + '_> {
        let (min_z, max_z) = match z_range {
            CoordRange::All => (0, self.z_size),
            CoordRange::Single(z) => {
                self.check_z(z)?;
                (z, z + 1)
            }
            // empty, wherever it starts
            CoordRange::Range(from, to) if from >= to => (self.z_size, self.z_size),
            CoordRange::Range(from, to) => {
                if to > self.z_size {
                    self.check_z(to - 1)?;
                }
                (from, to)
            }
        };

        let (iter, start) = self.iter_coords_alone(min_z, max_z);
        Ok(iter.zip(self.data[start..].iter()))
    }

    fn iter_coords_alone(
        &self,
        min_z: usize,
        max_z: usize,
    ) -> (impl Iterator<Item = (usize, usize, usize)>, usize) {
        let z_start = min_z * self.y_size * self.x_size;
        let iter = (min_z..max_z)
            .cartesian_product(0..self.y_size)
            .cartesian_product(0..self.x_size)
            .map(|((z, y), x)| (z, y, x));
        (iter, z_start.min(self.data.len()))
    }

    fn check_z(&self, z: usize) -> GridResult<()> {
        if z < self.z_size {
            Ok(())
        } else {
            Err(GridError::OutOfRange {
                axis: Axis::Z,
                index: z,
                extent: self.z_size,
            })
        }
    }

    /// Moves the buffer out in constant time, leaving this grid empty
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl<T> Grid for Grid3D<T> {
    type Item = T;
    type Coord = (usize, usize, usize);
    type Dims = [usize; 3];

    /// [z, y, x]
    fn dimensions(&self) -> [usize; 3] {
        [self.z_size, self.y_size, self.x_size]
    }

    fn array(&self) -> &[T] {
        &self.data
    }

    fn array_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    fn flatten(&self, (z, y, x): (usize, usize, usize)) -> GridResult<usize> {
        grid_impl::flatten_coords(self.dimensions(), [z, y, x], AXES)
    }

    fn unflatten(&self, index: usize) -> Option<(usize, usize, usize)> {
        grid_impl::unflatten_index(self.dimensions(), index).map(|[z, y, x]| (z, y, x))
    }
}

/// The empty state, as left behind by [Grid3D::take]
impl<T> Default for Grid3D<T> {
    fn default() -> Self {
        Self {
            z_size: 0,
            y_size: 0,
            x_size: 0,
            data: Box::new([]),
        }
    }
}

impl<T> TryFrom<RawGrid3D<T>> for Grid3D<T> {
    type Error = GridError;

    fn try_from(raw: RawGrid3D<T>) -> Result<Self, Self::Error> {
        Self::from_vec(raw.z_size, raw.y_size, raw.x_size, raw.data)
    }
}

impl<T> Index<(usize, usize, usize)> for Grid3D<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, (z, y, x): (usize, usize, usize)) -> &Self::Output {
        expect_in_range(self.get(z, y, x))
    }
}

impl<T> IndexMut<(usize, usize, usize)> for Grid3D<T> {
    #[track_caller]
    fn index_mut(&mut self, (z, y, x): (usize, usize, usize)) -> &mut Self::Output {
        expect_in_range(self.get_mut(z, y, x))
    }
}

impl<T> AsRef<[T]> for Grid3D<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    /// Every cell holds its own flattened index
    fn numbered(z: usize, y: usize, x: usize) -> Grid3D<usize> {
        Grid3D::from_vec(z, y, x, (0..z * y * x).collect()).unwrap()
    }

    #[test]
    fn construction() {
        let grid = Grid3D::filled(2, 3, 4, 1.0f32).unwrap();
        assert_eq!(grid.dimensions(), [2, 3, 4]);
        assert_eq!(
            (grid.z_size(), grid.y_size(), grid.x_size()),
            (2, 3, 4)
        );
        assert_eq!(grid.len(), 24);
        assert_eq!(grid.get(1, 1, 1), Ok(&1.0));

        let defaults = Grid3D::<Option<u8>>::new(1, 1, 3).unwrap();
        assert!(defaults.iter().all(Option::is_none));
    }

    #[test]
    fn zero_extent_rejected() {
        for (z, y, x, axis) in [
            (0, 1, 1, Axis::Z),
            (1, 0, 1, Axis::Y),
            (1, 1, 0, Axis::X),
            (0, 0, 0, Axis::Z),
        ] {
            let err = Grid3D::<u8>::new(z, y, x).unwrap_err();
            assert_eq!(err, GridError::ZeroExtent { axis });
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }

        assert!(Grid3D::filled(2, 0, 2, 'a').is_err());
    }

    #[test]
    fn row_major_layout() {
        let grid = numbered(2, 3, 4);
        assert_eq!(grid[(0, 0, 1)], 1);
        assert_eq!(grid[(0, 1, 0)], 4);
        assert_eq!(grid[(1, 0, 0)], 12);
        assert_eq!(grid[(1, 2, 3)], 23);

        for i in grid.indices() {
            let coord = grid.unflatten(i).unwrap();
            assert_eq!(grid.flatten(coord), Ok(i));
        }
    }

    #[test]
    fn out_of_range() {
        let mut grid = numbered(2, 3, 4);
        for (z, y, x, axis) in [
            (2, 0, 0, Axis::Z),
            (0, 3, 0, Axis::Y),
            (0, 0, 4, Axis::X),
        ] {
            let err = grid.get(z, y, x).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OutOfRange);
            assert!(matches!(err, GridError::OutOfRange { axis: a, .. } if a == axis));
            assert!(grid.get_mut(z, y, x).is_err());
        }
    }

    #[test]
    #[should_panic(expected = "z index 7 is not less than extent 2")]
    fn index_panics() {
        let grid = numbered(2, 3, 4);
        let _ = grid[(7, 0, 0)];
    }

    #[test]
    fn read_after_write() {
        let mut grid = Grid3D::<i32>::new(3, 3, 3).unwrap();
        *grid.get_mut(2, 1, 0).unwrap() = 5;
        grid[(0, 2, 2)] = 7;

        assert_eq!(grid.get(2, 1, 0), Ok(&5));
        assert_eq!(grid[(0, 2, 2)], 7);
        assert_eq!(grid.iter().sum::<i32>(), 12);
    }

    #[test]
    fn slice_copies_layer() {
        let grid = numbered(3, 2, 4);
        for z in 0..grid.z_size() {
            let slice = grid.slice(z).unwrap();
            assert_eq!(slice.dimensions(), [2, 4]);
            for y in 0..slice.y_size() {
                for x in 0..slice.x_size() {
                    assert_eq!(slice.get(y, x), grid.get(z, y, x));
                }
            }
        }

        assert_eq!(
            grid.slice(3).unwrap_err(),
            GridError::OutOfRange {
                axis: Axis::Z,
                index: 3,
                extent: 3
            }
        );
    }

    #[test]
    fn slice_is_independent() {
        let mut grid = Grid3D::filled(2, 3, 4, 1.0f32).unwrap();
        let mut slice = grid.slice(1).unwrap();
        assert!(slice.iter().all(|&f| f == 1.0));

        slice[(0, 0)] = 5.0;
        assert_eq!(grid[(1, 0, 0)], 1.0);

        grid[(1, 1, 1)] = 3.0;
        assert_eq!(slice[(1, 1)], 1.0);
    }

    #[test]
    fn slice_replaces_2d_grid() {
        let g3 = Grid3D::filled(2, 3, 4, 1.0f32).unwrap();
        let mut g2 = Grid2D::filled(2, 5, 2.0f32).unwrap();
        assert_eq!(g2[(1, 1)], 2.0);

        g2 = g3.slice(1).unwrap();
        assert_eq!(g2.dimensions(), [3, 4]);
        assert_eq!(g2[(1, 1)], 1.0);
    }

    #[test]
    fn coord_iteration() {
        let grid = numbered(3, 2, 2);
        let expected = grid
            .iter()
            .enumerate()
            .map(|(i, val)| (grid.unflatten(i).unwrap(), val))
            .collect::<Vec<_>>();
        assert_eq!(grid.iter_coords().collect::<Vec<_>>(), expected);

        let layer = grid
            .iter_coords_with_z_range(CoordRange::Single(1))
            .unwrap()
            .collect::<Vec<_>>();
        assert_eq!(layer.len(), 4);
        assert_eq!(layer[0], ((1, 0, 0), &4));
        assert_eq!(layer[3], ((1, 1, 1), &7));

        let upper = grid
            .iter_coords_with_z_range(CoordRange::Range(1, 3))
            .unwrap()
            .map(|(_, v)| *v)
            .collect::<Vec<_>>();
        assert_eq!(upper, (4..12).collect::<Vec<_>>());

        assert_eq!(
            grid.iter_coords_with_z_range(CoordRange::All)
                .unwrap()
                .count(),
            12
        );
        assert_eq!(
            grid.iter_coords_with_z_range(CoordRange::Range(2, 2))
                .unwrap()
                .count(),
            0
        );
        assert!(grid
            .iter_coords_with_z_range(CoordRange::Range(1, 4))
            .is_err());
        assert!(grid
            .iter_coords_with_z_range(CoordRange::Single(3))
            .is_err());
    }

    #[test]
    fn coord_iteration_extreme_ranges() {
        let grid = numbered(3, 2, 2);
        for range in [
            CoordRange::Range(usize::MAX, 0),
            CoordRange::Range(usize::MAX, usize::MAX),
            CoordRange::Range(7, 3),
        ] {
            assert_eq!(grid.iter_coords_with_z_range(range).unwrap().count(), 0);
        }

        assert_eq!(
            grid.iter_coords_with_z_range(CoordRange::Range(usize::MAX - 1, usize::MAX))
                .err(),
            Some(GridError::OutOfRange {
                axis: Axis::Z,
                index: usize::MAX - 1,
                extent: 3
            })
        );
        assert!(grid
            .iter_coords_with_z_range(CoordRange::Single(usize::MAX))
            .is_err());
    }

    #[test]
    fn overflowing_extents_rejected() {
        let huge = 1 << (usize::BITS - 1);
        let err = Grid3D::<u8>::from_vec(huge, 2, 1, vec![]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(matches!(err, GridError::TooLarge { .. }));

        assert!(Grid3D::<u8>::new(usize::MAX, usize::MAX, 2).is_err());
        assert!(Grid3D::filled(2, usize::MAX, usize::MAX, 0u8).is_err());

        let doc = format!("(z_size: {}, y_size: 2, x_size: 1, data: [])", huge);
        assert!(ron::from_str::<Grid3D<u8>>(&doc).is_err());
    }

    #[test]
    fn take_and_fill() {
        let mut grid = numbered(2, 2, 2);
        let moved = grid.take();
        assert_eq!(grid.dimensions(), [0, 0, 0]);
        assert!(grid.slice(0).is_err());
        assert_eq!(grid.iter_coords().count(), 0);

        grid = moved;
        grid.fill(3);
        assert_eq!(grid.dimensions(), [2, 2, 2]);
        assert!(grid.iter().all(|&v| v == 3));
    }

    #[test]
    fn serde_validation() {
        let grid = numbered(2, 1, 2);
        let ron = ron::to_string(&grid).unwrap();
        let back: Grid3D<usize> = ron::from_str(&ron).unwrap();
        assert_eq!(grid, back);

        let bad = "(z_size: 2, y_size: 1, x_size: 2, data: [0, 1, 2])";
        assert!(ron::from_str::<Grid3D<usize>>(bad).is_err());
    }
}
