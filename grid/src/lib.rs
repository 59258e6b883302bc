//! Fixed-shape 1D, 2D and 3D grids owning a single contiguous row-major buffer.
//!
//! Every accessor is bounds checked: the fallible `get`/`get_mut`/`row`/`slice` return a
//! [GridError], and the index operators panic with the same error.

mod error;
mod grid1d;
mod grid2d;
mod grid3d;
mod grid_impl;
mod row;

pub use error::{Axis, ErrorKind, GridError, GridResult};
pub use grid1d::Grid1D;
pub use grid2d::Grid2D;
pub use grid3d::{CoordRange, Grid3D};
pub use grid_impl::Grid;
pub use row::{Row, RowMut};

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::rc::Rc;

    use crate::*;

    /// Clone panics once the shared budget runs out, and drops are counted
    #[derive(Debug)]
    struct Fragile {
        value: u32,
        clones_left: Rc<Cell<u32>>,
        live: Rc<Cell<i32>>,
    }

    impl Fragile {
        fn new(value: u32, clones_left: &Rc<Cell<u32>>, live: &Rc<Cell<i32>>) -> Self {
            live.set(live.get() + 1);
            Self {
                value,
                clones_left: clones_left.clone(),
                live: live.clone(),
            }
        }
    }

    impl Clone for Fragile {
        fn clone(&self) -> Self {
            let left = self.clones_left.get();
            if left == 0 {
                panic!("out of clones");
            }
            self.clones_left.set(left - 1);
            Fragile::new(self.value, &self.clones_left, &self.live)
        }
    }

    impl Drop for Fragile {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    #[test]
    fn failed_copy_assign_leaves_receiver_unchanged() {
        let clones_left = Rc::new(Cell::new(0));
        let live = Rc::new(Cell::new(0));

        let source = Grid2D::from_vec(
            2,
            2,
            (0..4).map(|i| Fragile::new(i, &clones_left, &live)).collect(),
        )
        .unwrap();
        let mut receiver = Grid2D::from_value(Fragile::new(99, &clones_left, &live));
        assert_eq!(live.get(), 5);

        // enough budget for half the buffer only
        clones_left.set(2);
        let result = catch_unwind(AssertUnwindSafe(|| receiver.clone_from(&source)));
        assert!(result.is_err());

        // receiver untouched, partial copies released
        assert_eq!(receiver.dimensions(), [1, 1]);
        assert_eq!(receiver[(0, 0)].value, 99);
        assert_eq!(live.get(), 5);

        // and with enough budget it succeeds
        clones_left.set(4);
        receiver.clone_from(&source);
        assert_eq!(receiver.dimensions(), [2, 2]);
        assert_eq!(receiver[(1, 1)].value, 3);
        assert_eq!(live.get(), 8);

        drop(receiver);
        drop(source);
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn failed_slice_releases_partial_copy() {
        let clones_left = Rc::new(Cell::new(0));
        let live = Rc::new(Cell::new(0));

        let grid = Grid3D::from_vec(
            2,
            1,
            3,
            (0..6).map(|i| Fragile::new(i, &clones_left, &live)).collect(),
        )
        .unwrap();

        clones_left.set(1);
        let result = catch_unwind(AssertUnwindSafe(|| grid.slice(1)));
        assert!(result.is_err());
        assert_eq!(live.get(), 6);
        assert_eq!(grid[(1, 0, 2)].value, 5);
    }

    #[test]
    fn moves_are_constant_time() {
        let mut one = Grid1D::filled(100, 1u8).unwrap();
        let mut two = Grid2D::filled(10, 10, 2u8).unwrap();
        let mut three = Grid3D::filled(5, 5, 5, 3u8).unwrap();
        let ptrs = (
            one.array().as_ptr(),
            two.array().as_ptr(),
            three.array().as_ptr(),
        );

        let (one_moved, two_moved, three_moved) = (one.take(), two.take(), three.take());
        assert_eq!(
            ptrs,
            (
                one_moved.array().as_ptr(),
                two_moved.array().as_ptr(),
                three_moved.array().as_ptr()
            )
        );

        assert_eq!(one.size(), 0);
        assert_eq!(two.dimensions(), [0, 0]);
        assert_eq!(three.dimensions(), [0, 0, 0]);
        assert!(one.is_empty() && two.is_empty() && three.is_empty());
    }

    #[test]
    fn every_cell_reachable_exactly_once() {
        let grid = Grid3D::<u8>::new(3, 4, 5).unwrap();
        let mut seen = vec![false; grid.len()];
        for z in 0..3 {
            for y in 0..4 {
                for x in 0..5 {
                    let i = grid.flatten((z, y, x)).unwrap();
                    assert!(!seen[i]);
                    seen[i] = true;
                }
            }
        }
        assert!(seen.into_iter().all(|b| b));
    }
}
