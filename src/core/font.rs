//! Text measuring and drawing for the fingerprint label.
//!
//! Rendering goes through [`TextRenderer`] so the label code does not care
//! whether a TrueType font was found on this machine. [`BuiltinFont`] is
//! always available and is what [`load_label_font`] falls back to.

use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use image::{Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::error::FontError;

/// Smallest size the shrink-to-fit search tries.
pub const MIN_LABEL_FONT_SIZE: u32 = 10;

/// Font tried when no explicit font is given.
pub const DEFAULT_FONT_FILE: &str = "DejaVuSansMono.ttf";

const SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/TTF",
    "/usr/share/fonts/dejavu",
    "/usr/local/share/fonts",
    "/Library/Fonts",
];

pub trait TextRenderer {
    /// Human-readable font name for reports.
    fn name(&self) -> &str;

    /// Horizontal extent of `text` at `size`, in pixels.
    fn measure_text(&self, text: &str, size: u32) -> u32;

    /// Draw `text` with its top-left corner at `origin`. Pixels falling
    /// outside the canvas are dropped.
    fn render_text(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        size: u32,
        origin: (u32, u32),
        color: Rgb<u8>,
    );
}

pub struct TrueTypeFont {
    name: String,
    font: FontVec,
}

impl TrueTypeFont {
    pub fn load(path: &Path) -> Result<Self, FontError> {
        let data = fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec(data).map_err(|source| FontError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, font })
    }

    /// Glyph ids of `text` paired with their caret x offset.
    fn layout(&self, text: &str, size: u32) -> (Vec<(GlyphId, f32)>, f32) {
        let scaled = self.font.as_scaled(PxScale::from(size as f32));
        let mut caret = 0.0f32;
        let mut prev: Option<GlyphId> = None;
        let mut glyphs = Vec::with_capacity(text.len());
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(p) = prev {
                caret += scaled.kern(p, id);
            }
            glyphs.push((id, caret));
            caret += scaled.h_advance(id);
            prev = Some(id);
        }
        (glyphs, caret)
    }
}

impl TextRenderer for TrueTypeFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn measure_text(&self, text: &str, size: u32) -> u32 {
        let (_, width) = self.layout(text, size);
        width.ceil() as u32
    }

    fn render_text(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        size: u32,
        origin: (u32, u32),
        color: Rgb<u8>,
    ) {
        let scale = PxScale::from(size as f32);
        let baseline = origin.1 as f32 + self.font.as_scaled(scale).ascent();
        let (glyphs, _) = self.layout(text, size);

        for (id, x) in glyphs {
            let glyph = id.with_scale_and_position(scale, point(origin.0 as f32 + x, baseline));
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + gx as i64;
                let py = bounds.min.y as i64 + gy as i64;
                blend_pixel(canvas, px, py, color, coverage);
            });
        }
    }
}

/// 5x7 bitmap font compiled into the binary.
///
/// A size maps to an integer pixel scale of `max(1, size / 8)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFont;

impl BuiltinFont {
    /// Smallest meaningful size (scale 1).
    pub const MIN_SIZE: u32 = 8;

    const GLYPH_WIDTH: u32 = 5;
    const GLYPH_HEIGHT: u32 = 7;
    const ADVANCE: u32 = 6;

    pub fn scale(size: u32) -> u32 {
        (size / Self::MIN_SIZE).max(1)
    }

    /// Rendered height of a line at `size`.
    pub fn line_height(size: u32) -> u32 {
        Self::GLYPH_HEIGHT * Self::scale(size)
    }
}

impl TextRenderer for BuiltinFont {
    fn name(&self) -> &str {
        "builtin"
    }

    fn measure_text(&self, text: &str, size: u32) -> u32 {
        let n = text.chars().count() as u32;
        if n == 0 {
            return 0;
        }
        // No trailing gap after the last glyph.
        (n * Self::ADVANCE - (Self::ADVANCE - Self::GLYPH_WIDTH)) * Self::scale(size)
    }

    fn render_text(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        size: u32,
        origin: (u32, u32),
        color: Rgb<u8>,
    ) {
        let scale = Self::scale(size) as i64;
        let (ox, oy) = (origin.0 as i64, origin.1 as i64);

        for (i, c) in text.chars().enumerate() {
            let Some(rows) = builtin_glyph(c) else {
                continue;
            };
            let gx = ox + i as i64 * Self::ADVANCE as i64 * scale;
            for (ry, bits) in rows.iter().enumerate() {
                for cx in 0..Self::GLYPH_WIDTH {
                    if (bits >> (Self::GLYPH_WIDTH - 1 - cx)) & 1 == 0 {
                        continue;
                    }
                    let x0 = gx + cx as i64 * scale;
                    let y0 = oy + ry as i64 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            blend_pixel(canvas, x0 + dx, y0 + dy, color, 1.0);
                        }
                    }
                }
            }
        }
    }
}

fn blend_pixel(canvas: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 || x > u32::MAX as i64 || y > u32::MAX as i64 {
        return;
    }
    let Some(px) = canvas.get_pixel_mut_checked(x as u32, y as u32) else {
        return;
    };
    let a = coverage.clamp(0.0, 1.0);
    for (dst, src) in px.0.iter_mut().zip(color.0) {
        *dst = (*dst as f32 * (1.0 - a) + src as f32 * a).round() as u8;
    }
}

/// Rows of a built-in glyph, most significant of the low 5 bits is leftmost.
fn builtin_glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        ' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'a' => [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F],
        'b' => [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x1E],
        'c' => [0x00, 0x00, 0x0E, 0x10, 0x10, 0x11, 0x0E],
        'd' => [0x01, 0x01, 0x0D, 0x13, 0x11, 0x11, 0x0F],
        'e' => [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E],
        'f' => [0x06, 0x09, 0x08, 0x1C, 0x08, 0x08, 0x08],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        c if c.is_ascii_lowercase() => return builtin_glyph(c.to_ascii_uppercase()),
        _ => return None,
    };
    Some(rows)
}

/// Paths tried for the label font, most specific first.
pub fn font_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Some(p) = explicit {
        out.push(p.to_path_buf());
    }
    out.push(PathBuf::from(DEFAULT_FONT_FILE));
    out.extend(
        SYSTEM_FONT_DIRS
            .iter()
            .map(|dir| Path::new(dir).join(DEFAULT_FONT_FILE)),
    );
    out
}

/// Load the first usable TrueType font, or the built-in font if none loads.
pub fn load_label_font(explicit: Option<&Path>) -> Box<dyn TextRenderer> {
    for path in font_candidates(explicit) {
        match TrueTypeFont::load(&path) {
            Ok(font) => {
                debug!(path = %path.display(), "loaded label font");
                return Box::new(font);
            }
            Err(e) if explicit == Some(path.as_path()) => warn!("{e}"),
            Err(e) => debug!("{e}"),
        }
    }
    warn!("no TrueType label font available, using built-in font");
    Box::new(BuiltinFont)
}

/// Largest size in `min..=initial` whose rendering of `text` fits `max_width`.
pub fn fit_font_size(
    renderer: &dyn TextRenderer,
    text: &str,
    max_width: u32,
    initial: u32,
    min: u32,
) -> Option<u32> {
    (min..=initial)
        .rev()
        .find(|&size| renderer.measure_text(text, size) <= max_width)
}

/// A renderer together with the size chosen for the label.
pub struct LabelFont<'a> {
    pub renderer: &'a dyn TextRenderer,
    pub size: u32,
}

/// Shrink-to-fit with `renderer`, falling back to the built-in font at its
/// minimal size when nothing down to [`MIN_LABEL_FONT_SIZE`] fits.
pub fn select_label_font<'a>(
    renderer: &'a dyn TextRenderer,
    text: &str,
    max_width: u32,
    initial: u32,
) -> LabelFont<'a> {
    match fit_font_size(renderer, text, max_width, initial, MIN_LABEL_FONT_SIZE) {
        Some(size) => LabelFont { renderer, size },
        None => {
            debug!(max_width, "label does not fit, using minimal built-in font");
            LabelFont {
                renderer: &BuiltinFont,
                size: BuiltinFont::MIN_SIZE,
            }
        }
    }
}
