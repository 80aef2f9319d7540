use image::{ImageFormat, Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::chunk::split_chunks;
use crate::core::error::FingerprintError;
use crate::core::font::{TextRenderer, select_label_font};
use crate::core::grid::Grid;
use crate::core::hash::{Txid, decode_tx_hex};
use crate::core::layout::{Layout, RenderConfig};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const LABEL_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Text drawn under the grid.
pub fn label_text(txid: &Txid) -> String {
    format!("TXID: {txid}")
}

/// A rendered, not yet persisted, fingerprint.
pub struct Fingerprint {
    pub image: RgbImage,
    pub txid: Txid,
    pub layout: Layout,
    /// Chunks taken from the transaction (padding excluded).
    pub squares: usize,
    pub font: String,
    pub font_size: u32,
}

/// What was written, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct RenderSummary {
    pub output: PathBuf,
    pub txid: Txid,
    pub grid_dim: u32,
    pub squares: usize,
    pub square_size: u32,
    pub width: u32,
    pub height: u32,
    pub font: String,
    pub font_size: u32,
}

/// Render `tx_hex` as a color grid with a TXID label.
///
/// The hex is trimmed and lower-cased first. `txid` is used as given when
/// present, otherwise computed from the bytes.
pub fn render_fingerprint(
    tx_hex: &str,
    txid: Option<Txid>,
    config: &RenderConfig,
    font: &dyn TextRenderer,
) -> Result<Fingerprint, FingerprintError> {
    let tx_hex = tx_hex.trim().to_ascii_lowercase();
    let tx_bytes = decode_tx_hex(&tx_hex)?;
    if tx_bytes.is_empty() {
        return Err(FingerprintError::EmptyTransaction);
    }
    let txid = txid.unwrap_or_else(|| Txid::from_tx_bytes(&tx_bytes));

    let grid = Grid::new(split_chunks(&tx_bytes));
    let layout = Layout::compute(grid.dim() as u32, config)?;
    debug!(
        grid_dim = layout.grid_dim,
        square_size = layout.square_size,
        width = layout.image_width,
        height = layout.image_height,
        "computed layout"
    );

    let mut image = RgbImage::from_pixel(layout.image_width, layout.image_height, BACKGROUND);
    for (col, row, chunk) in grid.iter() {
        fill_square(&mut image, &layout, col as u32, row as u32, chunk.color());
    }

    let label = label_text(&txid);
    let label_font = select_label_font(font, &label, layout.label_width(), config.font_size);
    label_font.renderer.render_text(
        &mut image,
        &label,
        label_font.size,
        (layout.margin, layout.label_y),
        LABEL_COLOR,
    );

    Ok(Fingerprint {
        image,
        txid,
        layout,
        squares: grid.raw_chunks().len(),
        font: label_font.renderer.name().to_string(),
        font_size: label_font.size,
    })
}

fn fill_square(image: &mut RgbImage, layout: &Layout, col: u32, row: u32, color: Rgb<u8>) {
    let (x0, y0) = layout.cell_origin(col, row);
    for y in y0..y0 + layout.square_size {
        for x in x0..x0 + layout.square_size {
            image.put_pixel(x, y, color);
        }
    }
}

impl Fingerprint {
    /// Write the image; the format follows the extension, PNG if unknown.
    pub fn save(&self, path: &Path) -> Result<RenderSummary, FingerprintError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
        self.image.save_with_format(path, format)?;
        info!(path = %path.display(), "fingerprint saved");

        Ok(RenderSummary {
            output: path.to_path_buf(),
            txid: self.txid,
            grid_dim: self.layout.grid_dim,
            squares: self.squares,
            square_size: self.layout.square_size,
            width: self.layout.image_width,
            height: self.layout.image_height,
            font: self.font.clone(),
            font_size: self.font_size,
        })
    }
}

/// Render and persist in one step. Nothing is written if rendering fails.
pub fn render_to_file(
    tx_hex: &str,
    txid: Option<Txid>,
    output: &Path,
    config: &RenderConfig,
    font: &dyn TextRenderer,
) -> Result<RenderSummary, FingerprintError> {
    render_fingerprint(tx_hex, txid, config, font)?.save(output)
}
