use std::fmt::Write as _;
use std::io::{self, Write as _};

use grid::{Grid2D, GridResult};
use misc::*;

/// Prints 2D grids as rows of right-aligned, fixed-width cells
pub struct GridPrinter {
    cell_width: usize,
    default_label: String,
}

impl GridPrinter {
    pub fn new(display: &config::Display) -> Self {
        Self {
            cell_width: display.cell_width,
            default_label: display.default_label.clone(),
        }
    }

    pub fn render<T: Display>(&self, grid: &Grid2D<T>, label: Option<&str>) -> GridResult<String> {
        let label = label.unwrap_or(self.default_label.as_str());
        let mut out = String::new();

        // writing to a String can't fail
        let _ = writeln!(out, "{} ({}x{}):", label, grid.y_size(), grid.x_size());
        for y in 0..grid.y_size() {
            out.push_str("| ");
            for x in 0..grid.x_size() {
                let cell = grid.get(y, x)?;
                let _ = write!(out, "{:>width$} ", cell, width = self.cell_width);
            }
            out.push_str("|\n");
        }
        out.push('\n');

        Ok(out)
    }

    pub fn print<T: Display>(&self, grid: &Grid2D<T>, label: Option<&str>) -> BoxedResult<()> {
        let rendered = self.render(grid, label)?;
        io::stdout().lock().write_all(rendered.as_bytes())?;
        Ok(())
    }
}
