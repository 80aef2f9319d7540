use std::path::PathBuf;

use crate::core::error::LayoutError;

/// Layout parameters for a fingerprint image.
///
/// `width` and `height` are upper bounds: the rendered image is shrunk to fit
/// the grid exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    /// Label font size to start the shrink-to-fit search from. Twice this
    /// value is reserved below the grid for the label.
    pub font_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
            margin: 50,
            font_size: 36,
        }
    }
}

impl RenderConfig {
    pub fn default_output_path() -> PathBuf {
        PathBuf::from("tx_postable.png")
    }

    /// Space available for the grid: `(width - 2m, height - 2m - 2*font_size)`.
    pub fn usable_area(&self) -> Result<(u32, u32), LayoutError> {
        let no_area = LayoutError::NoDrawableArea {
            width: self.width,
            height: self.height,
        };
        let usable_width = self
            .margin
            .checked_mul(2)
            .and_then(|m| self.width.checked_sub(m))
            .ok_or(no_area.clone())?;
        let usable_height = self
            .margin
            .checked_add(self.font_size)
            .and_then(|v| v.checked_mul(2))
            .and_then(|v| self.height.checked_sub(v))
            .ok_or(no_area)?;
        Ok((usable_width, usable_height))
    }
}

/// Pixel geometry of a rendered fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub grid_dim: u32,
    pub square_size: u32,
    pub margin: u32,
    pub image_width: u32,
    pub image_height: u32,
    /// Top of the label text.
    pub label_y: u32,
}

impl Layout {
    /// Fit a `grid_dim x grid_dim` grid into the usable area of `config`.
    ///
    /// Fails instead of producing zero-size cells.
    pub fn compute(grid_dim: u32, config: &RenderConfig) -> Result<Self, LayoutError> {
        let (usable_width, usable_height) = config.usable_area()?;
        let square_size = if grid_dim == 0 {
            0
        } else {
            (usable_width / grid_dim).min(usable_height / grid_dim)
        };
        if square_size == 0 {
            return Err(LayoutError::CellTooSmall {
                grid_dim,
                usable_width,
                usable_height,
            });
        }

        let mut layout = Self {
            grid_dim,
            square_size,
            margin: config.margin,
            image_width: 0,
            image_height: 0,
            label_y: 0,
        };
        let grid_px = layout.grid_px();
        layout.image_width = grid_px + 2 * config.margin;
        layout.image_height = grid_px + 2 * config.margin + 2 * config.font_size;
        layout.label_y = grid_px + config.margin + config.font_size / 2;
        Ok(layout)
    }

    /// Side of the whole grid in pixels.
    pub fn grid_px(&self) -> u32 {
        self.grid_dim * self.square_size
    }

    /// Top-left pixel of the cell at `(col, row)`.
    pub fn cell_origin(&self, col: u32, row: u32) -> (u32, u32) {
        (
            col * self.square_size + self.margin,
            row * self.square_size + self.margin,
        )
    }

    /// Width the label may occupy.
    pub fn label_width(&self) -> u32 {
        self.image_width - 2 * self.margin
    }
}
