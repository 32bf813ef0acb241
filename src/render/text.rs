//! Font-rendered text for canvas overlays.
//!
//! Panel labels use the seven-segment glyphs in [`super::glyph`]; the surface
//! title uses a real font instead. Two faces are available:
//!
//! - **Bitmap**: the embedded Spleen 12x24 font, scaled nearest-neighbour to
//!   any pixel height. Always available.
//! - **TrueType**: any TTF/OTF file loaded at startup, rasterized with
//!   anti-aliasing via `ab_glyph`.
//!
//! [`fit_to_width`] picks a pixel height whose measured text width lands
//! within 10% of a target width.

use ab_glyph::{Font, FontArc, ScaleFont};
use spleen_font::{FONT_12X24, PSF2Font};
use std::path::Path;

use super::canvas::Canvas;
use super::palette::Color;
use crate::error::PixelMapError;

const SPLEEN_W: usize = 12;
const SPLEEN_H: usize = 24;

/// Smallest pixel height the fitter will choose.
pub const MIN_TEXT_HEIGHT: f32 = 8.0;
/// Accepted relative error between measured and target width.
pub const FIT_TOLERANCE: f32 = 0.10;
const MAX_FIT_ITERATIONS: usize = 12;

/// A font used for overlay text.
#[derive(Clone, Default)]
pub enum TextFace {
    #[default]
    Bitmap,
    TrueType(FontArc),
}

impl std::fmt::Debug for TextFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextFace::Bitmap => write!(f, "TextFace::Bitmap(spleen 12x24)"),
            TextFace::TrueType(_) => write!(f, "TextFace::TrueType"),
        }
    }
}

/// Anti-aliased coverage buffer for a run of text.
pub struct TextRender {
    pub width: usize,
    pub height: usize,
    /// Coverage per pixel: 0.0 = empty, 1.0 = fully inked.
    pub data: Vec<f32>,
}

impl TextFace {
    /// Load a TrueType/OpenType font from disk.
    pub fn from_file(path: &Path) -> Result<Self, PixelMapError> {
        let bytes = std::fs::read(path)?;
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| PixelMapError::Font(format!("Failed to parse {}: {}", path.display(), e)))?;
        Ok(TextFace::TrueType(font))
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextFace::Bitmap => "spleen-12x24",
            TextFace::TrueType(_) => "truetype",
        }
    }

    /// Width in pixels of `text` rendered at `pixel_height`.
    pub fn measure(&self, text: &str, pixel_height: f32) -> f32 {
        match self {
            TextFace::Bitmap => {
                let scale = pixel_height / SPLEEN_H as f32;
                (text.chars().count() * SPLEEN_W) as f32 * scale
            }
            TextFace::TrueType(font) => {
                let scaled = font.as_scaled(pixel_height);
                text.chars().map(|ch| scaled.h_advance(font.glyph_id(ch))).sum()
            }
        }
    }

    /// Rasterize `text` at `pixel_height` into a coverage buffer.
    pub fn render(&self, text: &str, pixel_height: f32) -> Result<TextRender, PixelMapError> {
        match self {
            TextFace::Bitmap => render_bitmap(text, pixel_height),
            TextFace::TrueType(font) => Ok(render_truetype(font, text, pixel_height)),
        }
    }

    /// Horizontal advance of a single character at `pixel_height`.
    fn advance(&self, ch: char, pixel_height: f32) -> f32 {
        match self {
            TextFace::Bitmap => SPLEEN_W as f32 * pixel_height / SPLEEN_H as f32,
            TextFace::TrueType(font) => font.as_scaled(pixel_height).h_advance(font.glyph_id(ch)),
        }
    }

    /// Longest prefix of `text` that measures at most `max_width` pixels.
    pub fn truncate_to_width<'a>(&self, text: &'a str, pixel_height: f32, max_width: f32) -> &'a str {
        let mut width = 0.0f32;
        for (idx, ch) in text.char_indices() {
            width += self.advance(ch, pixel_height);
            if width > max_width {
                return &text[..idx];
            }
        }
        text
    }

    /// Blend `text` onto the canvas with its top-left corner at `(x, y)`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        canvas: &mut Canvas,
        text: &str,
        x: i64,
        y: i64,
        pixel_height: f32,
        color: Color,
        alpha: f32,
    ) -> Result<(usize, usize), PixelMapError> {
        let rendered = self.render(text, pixel_height)?;
        rendered.blend_onto(canvas, x, y, color, alpha);
        Ok((rendered.width, rendered.height))
    }
}

impl TextRender {
    /// Composite the coverage buffer onto `canvas` at `(x, y)`.
    pub fn blend_onto(&self, canvas: &mut Canvas, x: i64, y: i64, color: Color, alpha: f32) {
        for row in 0..self.height {
            for col in 0..self.width {
                let coverage = self.data[row * self.width + col];
                if coverage > 0.0 {
                    canvas.blend_pixel(x + col as i64, y + row as i64, color, coverage * alpha);
                }
            }
        }
    }
}

/// Find a pixel height at which `text` is about `target_width` pixels wide.
///
/// Starts at half of `max_height` and rescales by the ratio of target to
/// measured width until the two agree within [`FIT_TOLERANCE`]. The result is
/// clamped to `[MIN_TEXT_HEIGHT, max_height]`.
pub fn fit_to_width(face: &TextFace, text: &str, target_width: f32, max_height: f32) -> f32 {
    let max_height = max_height.max(MIN_TEXT_HEIGHT);
    let mut height = (max_height / 2.0).max(MIN_TEXT_HEIGHT);

    for _ in 0..MAX_FIT_ITERATIONS {
        let width = face.measure(text, height);
        if width <= 0.0 || target_width <= 0.0 {
            break;
        }
        let ratio = target_width / width;
        if (ratio - 1.0).abs() <= FIT_TOLERANCE {
            break;
        }
        let next = (height * ratio).clamp(MIN_TEXT_HEIGHT, max_height);
        if (next - height).abs() < 0.01 {
            // Pinned against a bound.
            break;
        }
        height = next;
    }
    height
}

fn render_bitmap(text: &str, pixel_height: f32) -> Result<TextRender, PixelMapError> {
    let mut font = PSF2Font::new(FONT_12X24)
        .map_err(|_| PixelMapError::Font("Failed to load Spleen 12x24".to_string()))?;

    let scale = pixel_height.max(1.0) / SPLEEN_H as f32;
    let chars: Vec<char> = text.chars().collect();
    let width = ((chars.len() * SPLEEN_W) as f32 * scale).round().max(1.0) as usize;
    let height = (SPLEEN_H as f32 * scale).round().max(1.0) as usize;
    let mut data = vec![0.0f32; width * height];

    let mut bitmap = [false; SPLEEN_W * SPLEEN_H];
    for (i, ch) in chars.iter().enumerate() {
        bitmap.fill(false);
        let utf8 = ch.to_string();
        let Some(glyph) = font.glyph_for_utf8(utf8.as_bytes()) else {
            continue;
        };
        for (row_y, row) in glyph.enumerate() {
            for (col_x, on) in row.enumerate() {
                if row_y < SPLEEN_H && col_x < SPLEEN_W {
                    bitmap[row_y * SPLEEN_W + col_x] = on;
                }
            }
        }

        // Character cell in destination pixels.
        let x_start = ((i * SPLEEN_W) as f32 * scale).round() as usize;
        let x_end = (((i + 1) * SPLEEN_W) as f32 * scale).round() as usize;
        let cell_w = x_end.saturating_sub(x_start).max(1);
        for dy in 0..height {
            let sy = (dy * SPLEEN_H / height).min(SPLEEN_H - 1);
            for dx in 0..cell_w {
                let sx = (dx * SPLEEN_W / cell_w).min(SPLEEN_W - 1);
                let x = x_start + dx;
                if x < width && bitmap[sy * SPLEEN_W + sx] {
                    data[dy * width + x] = 1.0;
                }
            }
        }
    }

    Ok(TextRender { width, height, data })
}

fn render_truetype(font: &FontArc, text: &str, pixel_height: f32) -> TextRender {
    let scaled = font.as_scaled(pixel_height);

    let mut glyphs = Vec::new();
    let mut caret_x = 0.0f32;
    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        glyphs.push((glyph_id, caret_x));
        caret_x += scaled.h_advance(glyph_id);
    }

    let width = (caret_x.ceil() as usize).max(1);
    let ascent = scaled.ascent();
    let height = ((ascent - scaled.descent()).ceil() as usize).max(1);
    let mut data = vec![0.0f32; width * height];

    for &(glyph_id, glyph_x) in &glyphs {
        let glyph = glyph_id.with_scale_and_position(pixel_height, ab_glyph::point(glyph_x, ascent));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;
                if x >= 0 && x < width as i32 && y >= 0 && y < height as i32 {
                    let idx = y as usize * width + x as usize;
                    data[idx] = (data[idx] + coverage).min(1.0);
                }
            });
        }
    }

    TextRender { width, height, data }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::palette::{BLACK, WHITE};

    #[test]
    fn test_bitmap_measure_is_linear() {
        let face = TextFace::Bitmap;
        assert_eq!(face.measure("ABCD", 24.0), 48.0);
        assert_eq!(face.measure("ABCD", 48.0), 96.0);
        assert_eq!(face.measure("", 48.0), 0.0);
    }

    #[test]
    fn test_bitmap_render_dimensions() {
        let rendered = TextFace::Bitmap.render("Stage", 48.0).unwrap();
        assert_eq!(rendered.width, 5 * 24);
        assert_eq!(rendered.height, 48);
        assert_eq!(rendered.data.len(), rendered.width * rendered.height);
        assert!(rendered.data.iter().any(|&v| v > 0.0));
    }

    #[test]
    fn test_fit_converges_within_tolerance() {
        let face = TextFace::Bitmap;
        for (text, target) in [("Screen 1", 500.0), ("Main Stage Left", 2500.0), ("A", 60.0)] {
            let h = fit_to_width(&face, text, target, 10_000.0);
            let w = face.measure(text, h);
            assert!(
                ((w - target) / target).abs() <= FIT_TOLERANCE,
                "{}: width {} for target {}",
                text,
                w,
                target
            );
        }
    }

    #[test]
    fn test_fit_respects_max_height() {
        let face = TextFace::Bitmap;
        let h = fit_to_width(&face, "X", 5000.0, 100.0);
        assert_eq!(h, 100.0);
        let h = fit_to_width(&face, "a very long surface title indeed", 10.0, 100.0);
        assert_eq!(h, MIN_TEXT_HEIGHT);
    }

    #[test]
    fn test_draw_blends_onto_canvas() {
        let mut canvas = Canvas::new(200, 60, BLACK);
        let (w, h) = TextFace::Bitmap
            .draw(&mut canvas, "88", 10, 5, 48.0, WHITE, 1.0)
            .unwrap();
        assert_eq!((w, h), (48, 48));
        let lit = canvas.image().pixels().filter(|p| p.0 != [0, 0, 0]).count();
        assert!(lit > 50);
        // Nothing outside the text box.
        for (x, y, p) in canvas.image().enumerate_pixels() {
            if p.0 != [0, 0, 0] {
                assert!((10..58).contains(&x) && (5..53).contains(&y));
            }
        }
    }

    #[test]
    fn test_truncate_to_width() {
        let face = TextFace::Bitmap;
        // 24px bitmap glyphs advance 12px each.
        assert_eq!(face.truncate_to_width("Main Stage", 24.0, 48.0), "Main");
        assert_eq!(face.truncate_to_width("Main Stage", 24.0, 59.0), "Main");
        assert_eq!(face.truncate_to_width("Main Stage", 24.0, 500.0), "Main Stage");
        assert_eq!(face.truncate_to_width("Main Stage", 24.0, 5.0), "");
        assert_eq!(face.truncate_to_width("Bühne", 24.0, 36.0), "Büh");
        let kept = face.truncate_to_width("Main Stage", 24.0, 48.0);
        assert!(face.render(kept, 24.0).unwrap().width <= 48);
    }

    #[test]
    fn test_missing_font_file() {
        let result = TextFace::from_file(Path::new("/nonexistent/font.ttf"));
        assert!(matches!(result, Err(PixelMapError::Io(_))));
    }
}
