//! Canvas-level decorations drawn over the finished grid.
//!
//! | Overlay | Flag         | Geometry                                          |
//! |---------|--------------|---------------------------------------------------|
//! | cross   | `showCross`  | both corner-to-corner diagonals                   |
//! | circle  | `showCircle` | centered ring, radius 40% of the shorter side     |
//! | name    | `showName`   | centered title, ~25% of canvas width, dark backing |
//!
//! All overlays are translucent white and are composited in that order, so
//! the title always sits on top of the lines.

use super::canvas::Canvas;
use super::palette::{BLACK, WHITE};
use super::text::{TextFace, fit_to_width};
use crate::error::PixelMapError;
use crate::surface::RenderConfig;

/// Fraction of the canvas width the title aims for.
pub const NAME_WIDTH_FRACTION: f32 = 0.25;
/// Upper bound on title height, as a fraction of canvas height.
pub const NAME_MAX_HEIGHT_FRACTION: f32 = 0.20;
/// Circle radius as a fraction of the shorter canvas side.
pub const CIRCLE_RADIUS_FRACTION: f32 = 0.40;

const LINE_ALPHA: f32 = 0.6;
const NAME_ALPHA: f32 = 0.9;
const BACKING_ALPHA: f32 = 0.45;

/// Stroke thickness for cross and circle lines.
pub fn line_thickness(width: u32, height: u32) -> f32 {
    (width.min(height) / 150).max(2) as f32
}

/// Where and how large the title was drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct NameOverlay {
    pub text: String,
    pub pixel_height: f32,
    pub x: i64,
    pub y: i64,
    pub width: usize,
    pub height: usize,
}

/// Which overlays a pass drew.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayStats {
    pub cross: bool,
    pub circle: bool,
    pub name: Option<NameOverlay>,
}

/// Composite the overlays enabled in `config` onto `canvas`.
pub fn paint_overlays(
    canvas: &mut Canvas,
    config: &RenderConfig,
    face: &TextFace,
) -> Result<OverlayStats, PixelMapError> {
    let mut stats = OverlayStats::default();
    let (w, h) = (canvas.width(), canvas.height());
    if w == 0 || h == 0 {
        return Ok(stats);
    }
    let thickness = line_thickness(w, h);
    let (wf, hf) = (w as f32, h as f32);

    if config.show_cross {
        canvas.draw_line((0.0, 0.0), (wf, hf), thickness, WHITE, LINE_ALPHA);
        canvas.draw_line((wf, 0.0), (0.0, hf), thickness, WHITE, LINE_ALPHA);
        stats.cross = true;
    }

    if config.show_circle {
        let radius = wf.min(hf) * CIRCLE_RADIUS_FRACTION;
        canvas.stroke_circle(wf / 2.0, hf / 2.0, radius, thickness, WHITE, LINE_ALPHA);
        stats.circle = true;
    }

    if config.show_name {
        stats.name = Some(draw_name(canvas, &config.display_name(), face)?);
    }

    Ok(stats)
}

fn draw_name(canvas: &mut Canvas, text: &str, face: &TextFace) -> Result<NameOverlay, PixelMapError> {
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);
    let pixel_height =
        fit_to_width(face, text, w * NAME_WIDTH_FRACTION, h * NAME_MAX_HEIGHT_FRACTION).min(h);
    // Names too long even at the smallest height are cut to the canvas width.
    let text = face.truncate_to_width(text, pixel_height, w);
    let rendered = face.render(text, pixel_height)?;

    let x = ((w - rendered.width as f32) / 2.0).round() as i64;
    let y = ((h - rendered.height as f32) / 2.0).round() as i64;
    let pad = (rendered.height / 4).max(2) as i64;
    canvas.blend_rect(
        x - pad,
        y - pad,
        (rendered.width as i64 + 2 * pad) as u32,
        (rendered.height as i64 + 2 * pad) as u32,
        BLACK,
        BACKING_ALPHA,
    );
    rendered.blend_onto(canvas, x, y, WHITE, NAME_ALPHA);

    Ok(NameOverlay {
        text: text.to_string(),
        pixel_height,
        x,
        y,
        width: rendered.width,
        height: rendered.height,
    })
}
