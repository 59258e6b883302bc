use serde::Deserialize;

/// Every field is optional, missing ones take their default
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub display: Display,
    /// Scenarios to run when none are given on the command line. Empty means all of them
    pub scenarios: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Display {
    /// Width of the right-aligned field each cell is printed in
    pub cell_width: usize,
    /// Used when a grid is printed without a label
    pub default_label: String,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            cell_width: 6,
            default_label: "Grid".to_owned(),
        }
    }
}
