//! Image input: decode to RGB pixels, infer the codel size, classify.
//!
//! An image's codel size is the largest divisor `N` of both dimensions
//! such that every non-overlapping `N×N` pixel block is a single color; a
//! pixel-perfect k-fold upscale of a base grid therefore decodes back to
//! the base grid. Each codel is classified by its top-left pixel through
//! exact palette lookup.

use std::path::Path;

use pietc_core::{Color, Grid};

use crate::error::ParseError;

/// A decoded RGB image: `width * height * 3` bytes, row-major, R,G,B.
#[derive(Debug, Clone)]
pub struct RawImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RawImage {
    fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let i = ((y * self.width + x) * 3) as usize;
        (self.data[i], self.data[i + 1], self.data[i + 2])
    }
}

/// Decode an image file into raw RGB pixels, forcing three channels.
pub fn decode(path: &Path) -> Result<RawImage, ParseError> {
    let img = image::open(path)
        .map_err(|source| ParseError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();
    Ok(RawImage {
        width: img.width(),
        height: img.height(),
        data: img.into_raw(),
    })
}

/// Infer the codel size: the largest common divisor of width and height
/// for which every `N×N` block is uniform, or 1 if none is.
pub fn codel_size(img: &RawImage) -> u32 {
    let mut best = 1;
    for n in 1..=img.width.min(img.height) {
        if img.width % n != 0 || img.height % n != 0 {
            continue;
        }
        if blocks_are_uniform(img, n) {
            best = n;
        }
    }
    best
}

fn blocks_are_uniform(img: &RawImage, n: u32) -> bool {
    for by in (0..img.height).step_by(n as usize) {
        for bx in (0..img.width).step_by(n as usize) {
            let first = img.pixel(bx, by);
            for y in by..by + n {
                for x in bx..bx + n {
                    if img.pixel(x, y) != first {
                        return false;
                    }
                }
            }
        }
    }
    true
}

/// Group pixels into codels and classify each by its top-left pixel.
pub fn to_grid(img: &RawImage, codel_size: u32) -> Grid {
    let rows = (img.height / codel_size) as usize;
    let cols = (img.width / codel_size) as usize;
    let mut grid_rows = Vec::with_capacity(rows);
    for r in 0..rows {
        let mut row = Vec::with_capacity(cols);
        for c in 0..cols {
            let (red, green, blue) = img.pixel(c as u32 * codel_size, r as u32 * codel_size);
            row.push(Color::from_rgb(red, green, blue));
        }
        grid_rows.push(row);
    }
    Grid::from_rows(grid_rows)
}

/// Decode an image file into a codel grid, returning the inferred codel
/// size alongside it.
pub fn load_grid(path: &Path) -> Result<(Grid, u32), ParseError> {
    let img = decode(path)?;
    let size = codel_size(&img);
    Ok((to_grid(&img, size), size))
}
