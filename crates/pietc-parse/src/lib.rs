//! Input parsing for the Piet compiler.
//!
//! Two input formats are supported, dispatched on file extension:
//! `bmp`/`png`/`gif` files are decoded as images and grouped into codels
//! of an inferred size; everything else is read as whitespace-separated
//! hex color tokens, one grid row per line.

mod error;
pub mod image;
pub mod text;

use std::path::Path;

use pietc_core::Grid;

pub use error::ParseError;

/// A parsed input program.
#[derive(Debug)]
pub struct ParsedInput {
    pub grid: Grid,
    /// Codel edge length in pixels, for image inputs only.
    pub codel_size: Option<u32>,
}

/// Parse an input file into a codel grid.
///
/// Returns [`ParseError::EmptyGrid`] when the input yields no codels; the
/// remaining errors are I/O and image-decode failures.
pub fn parse_path(path: &Path) -> Result<ParsedInput, ParseError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    let parsed = if matches!(ext.as_str(), "bmp" | "png" | "gif") {
        let (grid, codel_size) = image::load_grid(path)?;
        ParsedInput {
            grid,
            codel_size: Some(codel_size),
        }
    } else {
        ParsedInput {
            grid: text::load_grid(path)?,
            codel_size: None,
        }
    };

    if parsed.grid.is_empty() {
        return Err(ParseError::EmptyGrid);
    }
    Ok(parsed)
}
