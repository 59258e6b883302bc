use grid::{CoordRange, ErrorKind, Grid, Grid1D, Grid2D, Grid3D, GridResult};
use misc::*;

use crate::render::GridPrinter;

pub type Scenario = fn(&GridPrinter) -> BoxedResult<()>;

pub struct ScenarioEntry {
    pub name: &'static str,
    pub func: Scenario,
}

inventory::collect!(ScenarioEntry);

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Unknown scenario {0:?}")]
    Unknown(String),

    #[error("Scenario {name:?} failed")]
    Failed {
        name: &'static str,
        #[source]
        source: Box<dyn Error>,
    },
}

/// All registered scenarios, sorted by name
pub fn all() -> Vec<&'static ScenarioEntry> {
    let mut all = inventory::iter::<ScenarioEntry>
        .into_iter()
        .collect::<Vec<_>>();
    all.sort_by_key(|e| e.name);
    all
}

pub fn all_names() -> impl Iterator<Item = &'static str> {
    all().into_iter().map(|e| e.name)
}

pub fn resolve(name: &str) -> Option<&'static ScenarioEntry> {
    inventory::iter::<ScenarioEntry>
        .into_iter()
        .find(|e| e.name == name)
}

/// Empty selection means every scenario
pub fn select(names: &[String]) -> Result<Vec<&'static ScenarioEntry>, ScenarioError> {
    if names.is_empty() {
        return Ok(all());
    }

    names
        .iter()
        .map(|name| resolve(name).ok_or_else(|| ScenarioError::Unknown(name.clone())))
        .collect()
}

impl ScenarioEntry {
    pub fn run(&self, printer: &GridPrinter) -> Result<(), ScenarioError> {
        (self.func)(printer).map_err(|source| ScenarioError::Failed {
            name: self.name,
            source,
        })
    }
}

macro_rules! scenario {
    ($func:ident) => {
        inventory::submit! { ScenarioEntry { name: stringify!($func), func: $func } }
    };
}

macro_rules! ensure {
    ($cond:expr, $($fmt:tt)+) => {
        if !$cond {
            return Err(format!($($fmt)+).into());
        }
    };
}

fn expect_error<T: Debug>(result: GridResult<T>, kind: ErrorKind, what: &str) -> BoxedResult<()> {
    match result {
        Err(err) if err.kind() == kind => {
            debug!("failed as expected"; "what" => what, "error" => %err);
            Ok(())
        }
        Err(err) => Err(format!("{}: expected {:?} but failed with '{}'", what, kind, err).into()),
        Ok(val) => Err(format!("{}: expected {:?} but got {:?}", what, kind, val).into()),
    }
}

fn approx(a: f32, b: f32) -> bool {
    a.approx_eq(b, F32Margin::default())
}

// -------------

scenario!(construction);
scenario!(row_views);
scenario!(slicing);
scenario!(one_dimensional);
scenario!(lifecycle);

fn construction(printer: &GridPrinter) -> BoxedResult<()> {
    let single = Grid2D::from_value(5);
    printer.print(&single, Some("single value"))?;

    let zeroes = Grid2D::<i32>::new(3, 2)?;
    printer.print(&zeroes, Some("default filled"))?;

    let filled = Grid2D::filled(2, 3, 4242.42f32)?;
    printer.print(&filled, Some("value filled"))?;

    let mut matrix = Grid2D::<i32>::new(3, 3)?;
    let mut counter = 1;
    for y in 0..matrix.y_size() {
        for x in 0..matrix.x_size() {
            *matrix.get_mut(y, x)? = counter;
            counter += 1;
        }
    }
    printer.print(&matrix, None)?;

    let corner = *matrix.get(2, 2)?;
    ensure!(corner == 9, "(2, 2) should be 9 but is {}", corner);
    expect_error(matrix.get(3, 0), ErrorKind::OutOfRange, "reading (3, 0)")?;

    let mut chars = Grid2D::filled(2, 4, 'E')?;
    printer.print(&chars, Some("characters"))?;

    chars.fill('Z');
    printer.print(&chars, Some("after fill"))?;
    ensure!(
        chars.dimensions() == [2, 4],
        "fill changed the shape to {:?}",
        chars.dimensions()
    );
    ensure!(chars.iter().all(|&c| c == 'Z'), "fill missed a cell");

    Ok(())
}

fn row_views(printer: &GridPrinter) -> BoxedResult<()> {
    let mut grid = Grid2D::filled(3, 2, 0.0f32)?;
    ensure!(
        grid.dimensions() == [3, 2],
        "unexpected shape {:?}",
        grid.dimensions()
    );

    for y in 0..grid.y_size() {
        for x in 0..grid.x_size() {
            ensure!(approx(grid[y][x], 0.0), "({}, {}) should start at 0", y, x);
        }
    }

    for y in 0..grid.y_size() {
        let mut row = grid.row_mut(y)?;
        for x in 0..row.len() {
            *row.get_mut(x)? = 1.0;
        }
    }

    for y in 0..grid.y_size() {
        for x in 0..grid.x_size() {
            let cell = *grid.get(y, x)?;
            ensure!(approx(cell, 1.0), "({}, {}) should be 1 but is {}", y, x, cell);
        }
    }

    expect_error(grid.row(3), ErrorKind::OutOfRange, "row 3")?;
    expect_error(
        grid.row(0).and_then(|row| row.get(2)),
        ErrorKind::OutOfRange,
        "row 0 column 2",
    )?;

    printer.print(&grid, Some("written through rows"))
}

fn slicing(printer: &GridPrinter) -> BoxedResult<()> {
    let g3 = Grid3D::filled(2, 3, 4, 1.0f32)?;
    ensure!(approx(*g3.get(1, 1, 1)?, 1.0), "(1, 1, 1) should be 1");

    let mut g2 = Grid2D::filled(2, 5, 2.0f32)?;
    ensure!(approx(*g2.get(1, 1)?, 2.0), "(1, 1) should be 2");
    printer.print(&g2, Some("before slicing"))?;

    g2 = g3.slice(1)?;
    printer.print(&g2, Some("slice at z=1"))?;
    ensure!(
        g2.dimensions() == [3, 4],
        "slice has shape {:?}",
        g2.dimensions()
    );
    ensure!(approx(*g2.get(1, 1)?, 1.0), "(1, 1) should be 1 after slicing");

    for ((y, x), cell) in g2.iter_coords() {
        let source = g3.get(1, y, x)?;
        ensure!(cell == source, "slice differs at ({}, {})", y, x);
    }

    let mut layer_cells = 0;
    for ((z, y, x), cell) in g3.iter_coords_with_z_range(CoordRange::Single(1))? {
        ensure!(
            z == 1 && g2.get(y, x)? == cell,
            "layer 1 differs from the slice at ({}, {}, {})",
            z,
            y,
            x
        );
        layer_cells += 1;
    }
    ensure!(
        layer_cells == g2.len(),
        "layer 1 has {} cells but the slice has {}",
        layer_cells,
        g2.len()
    );

    expect_error(g3.slice(2), ErrorKind::OutOfRange, "slice at z=2")
}

fn one_dimensional(_: &GridPrinter) -> BoxedResult<()> {
    let single = Grid1D::from_value('x');
    ensure!(
        single.size() == 1 && single[0] == 'x',
        "bad single value grid"
    );

    let mut squares = Grid1D::<i64>::new(5)?;
    for i in squares.indices() {
        *squares.get_mut(i)? = (i * i) as i64;
    }
    squares[0] = -1;
    info!("squares"; "contents" => ?squares.array());

    ensure!(*squares.get(0)? == -1, "write through index was lost");
    ensure!(squares[4] == 16, "(4) should be 16 but is {}", squares[4]);
    expect_error(squares.get(5), ErrorKind::OutOfRange, "reading index 5")?;

    let words = Grid1D::filled(3, "abc")?;
    ensure!(words.iter().all(|w| *w == "abc"), "fill missed a cell");

    Ok(())
}

fn lifecycle(_: &GridPrinter) -> BoxedResult<()> {
    let original = Grid2D::filled(2, 2, 7u32)?;
    let mut copy = original.clone();
    *copy.get_mut(0, 0)? = 1;
    ensure!(
        *original.get(0, 0)? == 7,
        "writing to a copy changed the original"
    );

    let mut source = Grid3D::filled(2, 2, 2, 'm')?;
    let moved = source.take();
    ensure!(
        source.is_empty() && source.dimensions() == [0, 0, 0],
        "moved-from grid is not empty"
    );
    ensure!(
        moved.dimensions() == [2, 2, 2],
        "moved grid has shape {:?}",
        moved.dimensions()
    );
    expect_error(source.get(0, 0, 0), ErrorKind::OutOfRange, "reading moved-from grid")?;

    expect_error(Grid1D::<u8>::new(0), ErrorKind::InvalidArgument, "zero size")?;
    expect_error(
        Grid2D::<u8>::new(0, 4),
        ErrorKind::InvalidArgument,
        "zero height",
    )?;
    expect_error(
        Grid3D::<u8>::new(1, 1, 0),
        ErrorKind::InvalidArgument,
        "zero width",
    )
}
