//! Parse errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while turning an input file into a codel grid.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("input contains no codels")]
    EmptyGrid,
}
