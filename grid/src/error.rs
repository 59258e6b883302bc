use misc::derive_more::Display;
use misc::{thiserror, Error};

/// Names the extent a [GridError] refers to. 1D grids only have [Axis::X]
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    #[display(fmt = "z")]
    Z,
    #[display(fmt = "y")]
    Y,
    #[display(fmt = "x")]
    X,
}

/// Broad category of a [GridError]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad construction arguments
    InvalidArgument,
    /// An index not strictly less than its extent
    OutOfRange,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Invalid argument: {axis} extent must be non-zero")]
    ZeroExtent { axis: Axis },

    #[error("Invalid argument: {dims:?} holds more elements than fit in memory")]
    TooLarge { dims: Vec<usize> },

    #[error("Invalid argument: buffer holds {actual} elements but dimensions need {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("Index out of range: {axis} index {index} is not less than extent {extent}")]
    OutOfRange {
        axis: Axis,
        index: usize,
        extent: usize,
    },
}

pub type GridResult<T> = Result<T, GridError>;

impl GridError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GridError::ZeroExtent { .. }
            | GridError::TooLarge { .. }
            | GridError::BufferLength { .. } => ErrorKind::InvalidArgument,
            GridError::OutOfRange { .. } => ErrorKind::OutOfRange,
        }
    }
}

/// Index operators can't return a Result, so they panic with the same error the fallible
/// accessor would have returned
#[track_caller]
pub(crate) fn expect_in_range<T>(result: GridResult<T>) -> T {
    match result {
        Ok(val) => val,
        Err(err) => panic!("{}", err),
    }
}
