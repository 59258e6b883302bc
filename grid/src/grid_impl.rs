use std::fmt::Debug;
use std::iter::repeat_with;
use std::ops::Range;

use crate::error::{Axis, GridError, GridResult};

/// Capabilities shared by every grid dimensionality
pub trait Grid {
    type Item;
    /// Index tuple, outermost axis first
    type Coord: Copy + Debug;
    /// Extents, outermost axis first
    type Dims: Copy + Debug;

    fn dimensions(&self) -> Self::Dims;

    fn array(&self) -> &[Self::Item];
    fn array_mut(&mut self) -> &mut [Self::Item];

    /// Row-major offset of the given coordinate, checked against every extent
    fn flatten(&self, coord: Self::Coord) -> GridResult<usize>;

    /// Inverse of [Self::flatten], None if index is past the end
    fn unflatten(&self, index: usize) -> Option<Self::Coord>;

    fn len(&self) -> usize {
        self.array().len()
    }

    /// Only true for the moved-from/default state
    fn is_empty(&self) -> bool {
        self.array().is_empty()
    }

    fn indices(&self) -> Range<usize> {
        0..self.len()
    }

    fn cell(&self, coord: Self::Coord) -> GridResult<&Self::Item> {
        let index = self.flatten(coord)?;
        Ok(&self.array()[index])
    }

    fn cell_mut(&mut self, coord: Self::Coord) -> GridResult<&mut Self::Item> {
        let index = self.flatten(coord)?;
        Ok(&mut self.array_mut()[index])
    }

    /// Overwrites every element, shape is unchanged
    fn fill(&mut self, value: Self::Item)
    where
        Self::Item: Clone,
    {
        self.array_mut().fill(value);
    }

    fn iter(&self) -> std::slice::Iter<'_, Self::Item> {
        self.array().iter()
    }

    fn iter_mut(&mut self) -> std::slice::IterMut<'_, Self::Item> {
        self.array_mut().iter_mut()
    }
}

/// Checks extents outermost first, returning the element count. The count must fit in a usize
pub(crate) fn full_size<const N: usize>(dims: [usize; N], axes: [Axis; N]) -> GridResult<usize> {
    dims.iter()
        .zip(axes)
        .try_fold(1usize, |product, (&extent, axis)| {
            if extent == 0 {
                Err(GridError::ZeroExtent { axis })
            } else {
                product
                    .checked_mul(extent)
                    .ok_or_else(|| GridError::TooLarge {
                        dims: dims.to_vec(),
                    })
            }
        })
}

/// Row-major offset, reporting the outermost axis that is out of range
pub(crate) fn flatten_coords<const N: usize>(
    dims: [usize; N],
    coord: [usize; N],
    axes: [Axis; N],
) -> GridResult<usize> {
    coord
        .iter()
        .zip(dims.iter())
        .zip(axes)
        .try_fold(0, |offset, ((&index, &extent), axis)| {
            if index < extent {
                Ok(offset * extent + index)
            } else {
                Err(GridError::OutOfRange {
                    axis,
                    index,
                    extent,
                })
            }
        })
}

/// Inverse of [flatten_coords], None if index is past the end
pub(crate) fn unflatten_index<const N: usize>(dims: [usize; N], index: usize) -> Option<[usize; N]> {
    let len = dims.iter().product::<usize>();
    if index >= len {
        return None;
    }

    let mut coord = [0; N];
    let mut remaining = index;
    for (c, &extent) in coord.iter_mut().zip(dims.iter()).rev() {
        *c = remaining % extent;
        remaining /= extent;
    }

    Some(coord)
}

pub(crate) fn alloc_default<T: Default, const N: usize>(
    dims: [usize; N],
    axes: [Axis; N],
) -> GridResult<Box<[T]>> {
    let len = full_size(dims, axes)?;
    Ok(repeat_with(T::default).take(len).collect())
}

pub(crate) fn alloc_filled<T: Clone, const N: usize>(
    dims: [usize; N],
    axes: [Axis; N],
    value: T,
) -> GridResult<Box<[T]>> {
    let len = full_size(dims, axes)?;
    Ok(vec![value; len].into_boxed_slice())
}

/// Takes ownership of an existing buffer, which must match the dimensions exactly
pub(crate) fn adopt_vec<T, const N: usize>(
    dims: [usize; N],
    axes: [Axis; N],
    data: Vec<T>,
) -> GridResult<Box<[T]>> {
    let expected = full_size(dims, axes)?;
    if data.len() != expected {
        return Err(GridError::BufferLength {
            expected,
            actual: data.len(),
        });
    }

    Ok(data.into_boxed_slice())
}
