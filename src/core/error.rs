use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("invalid transaction hex: {0}")]
    InvalidInput(#[from] hex::FromHexError),

    #[error("transaction hex is empty")]
    EmptyTransaction,

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("margins and label leave no drawable area in a {width}x{height} target")]
    NoDrawableArea { width: u32, height: u32 },

    #[error(
        "a {grid_dim}x{grid_dim} grid does not fit in {usable_width}x{usable_height}px (cell size would be 0)"
    )]
    CellTooSmall {
        grid_dim: u32,
        usable_width: u32,
        usable_height: u32,
    },
}

/// Font asset could not be used. Recovered by falling back to the built-in font.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("reading font {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parsing font {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: ab_glyph::InvalidFont,
    },
}
