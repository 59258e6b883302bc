use misc::derive_more::{Deref, DerefMut};

use crate::error::{Axis, GridError, GridResult};

/// Borrowed view of a single row of a [Grid2D](crate::Grid2D), derefs to the row's cells
#[derive(Deref, Debug)]
pub struct Row<'a, T> {
    #[deref(forward)]
    cells: &'a [T],
    y: usize,
}

/// Mutable borrowed view of a single row of a [Grid2D](crate::Grid2D)
#[derive(Deref, DerefMut, Debug)]
pub struct RowMut<'a, T> {
    #[deref(forward)]
    #[deref_mut(forward)]
    cells: &'a mut [T],
    y: usize,
}

fn check_x(x: usize, extent: usize) -> GridResult<usize> {
    if x < extent {
        Ok(x)
    } else {
        Err(GridError::OutOfRange {
            axis: Axis::X,
            index: x,
            extent,
        })
    }
}

impl<'a, T> Row<'a, T> {
    pub(crate) fn new(cells: &'a [T], y: usize) -> Self {
        Self { cells, y }
    }

    /// The row index this view is bound to
    pub fn y(&self) -> usize {
        self.y
    }

    pub fn get(&self, x: usize) -> GridResult<&'a T> {
        let x = check_x(x, self.cells.len())?;
        Ok(&self.cells[x])
    }

    pub fn into_slice(self) -> &'a [T] {
        self.cells
    }
}

impl<'a, T> RowMut<'a, T> {
    pub(crate) fn new(cells: &'a mut [T], y: usize) -> Self {
        Self { cells, y }
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn get(&self, x: usize) -> GridResult<&T> {
        let x = check_x(x, self.cells.len())?;
        Ok(&self.cells[x])
    }

    pub fn get_mut(&mut self, x: usize) -> GridResult<&mut T> {
        let x = check_x(x, self.cells.len())?;
        Ok(&mut self.cells[x])
    }

    pub fn into_slice(self) -> &'a mut [T] {
        self.cells
    }
}

// manual impls because derive would require T: Clone
impl<T> Clone for Row<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Row<'_, T> {}
