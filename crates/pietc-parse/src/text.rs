//! Text input: whitespace-separated hex color tokens, one row per line.

use std::fs;
use std::path::Path;

use pietc_core::{Color, Grid};

use crate::error::ParseError;

/// Parse a hex-token grid from a string. Empty lines are skipped; tokens
/// outside the palette become `Undefined` without a diagnostic.
pub fn parse_str(src: &str) -> Grid {
    let rows: Vec<Vec<Color>> = src
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split_whitespace().map(Color::from_hex).collect())
        .collect();
    Grid::from_rows(rows)
}

/// Read and parse a hex-token grid file.
pub fn load_grid(path: &Path) -> Result<Grid, ParseError> {
    let src = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_str(&src))
}
