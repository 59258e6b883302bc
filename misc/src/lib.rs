pub use derive_more;
pub use float_cmp::{ApproxEq, F32Margin};
pub use itertools::*;
pub use thiserror::{self, Error};

pub use logging::{self, prelude::*};

// misc imports that annoyingly get resolved to other pub exports of std/core
// https://github.com/intellij-rust/intellij-rust/issues/5654
pub use std::{
    error::Error,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
};

pub type BoxedResult<T> = Result<T, Box<dyn Error>>;
