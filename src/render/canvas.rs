//! RGB raster canvas with clipped fill primitives.
//!
//! All drawing calls accept signed coordinates and silently clip to the
//! canvas bounds, so callers can place shapes partially (or entirely)
//! off-canvas without checks of their own.

use image::{Rgb, RgbImage};

use super::palette::Color;

/// An in-memory RGB canvas, allocated once per render.
pub struct Canvas {
    image: RgbImage,
}

/// Inclusive-exclusive pixel span `[x0, x1) x [y0, y1)` after clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl Canvas {
    /// Allocate a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width() && y < self.height() {
            Some(*self.image.get_pixel(x, y))
        } else {
            None
        }
    }

    /// Raw interleaved RGB bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    fn bounds(&self) -> Span {
        Span {
            x0: 0,
            y0: 0,
            x1: self.width(),
            y1: self.height(),
        }
    }

    fn clip_rect(&self, x: i64, y: i64, w: i64, h: i64) -> Option<Span> {
        let b = self.bounds();
        let x0 = x.max(b.x0 as i64);
        let y0 = y.max(b.y0 as i64);
        let x1 = (x + w).min(b.x1 as i64);
        let y1 = (y + h).min(b.y1 as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Span {
            x0: x0 as u32,
            y0: y0 as u32,
            x1: x1 as u32,
            y1: y1 as u32,
        })
    }

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Color) {
        let Some(span) = self.clip_rect(x, y, w as i64, h as i64) else {
            return;
        };
        let stride = self.width() as usize * 3;
        let buf: &mut [u8] = &mut self.image;
        for row in span.y0..span.y1 {
            let start = row as usize * stride + span.x0 as usize * 3;
            let end = row as usize * stride + span.x1 as usize * 3;
            for px in buf[start..end].chunks_exact_mut(3) {
                px.copy_from_slice(&color.0);
            }
        }
    }

    /// Stroke a border of `thickness` pixels just inside the rectangle.
    ///
    /// The border never extends beyond `(x, y, w, h)`, so neighbouring
    /// rectangles can each carry their own border without overlap.
    pub fn stroke_rect(&mut self, x: i64, y: i64, w: u32, h: u32, thickness: u32, color: Color) {
        let t = thickness.min(w).min(h);
        if t == 0 {
            return;
        }
        self.fill_rect(x, y, w, t, color);
        self.fill_rect(x, y + (h - t) as i64, w, t, color);
        self.fill_rect(x, y, t, h, color);
        self.fill_rect(x + (w - t) as i64, y, t, h, color);
    }

    /// Fill a rectangle with circular corners of `radius` pixels.
    ///
    /// A pixel is inside when its center lies inside the rounded shape.
    pub fn fill_rounded_rect(&mut self, x: i64, y: i64, w: u32, h: u32, radius: u32, color: Color) {
        let r = radius.min(w / 2).min(h / 2);
        if r == 0 {
            self.fill_rect(x, y, w, h, color);
            return;
        }
        let Some(span) = self.clip_rect(x, y, w as i64, h as i64) else {
            return;
        };
        let rf = r as f32;
        // Corner circle centers, in pixel-center coordinates.
        let left = x as f32 + rf;
        let right = (x + w as i64) as f32 - rf;
        let top = y as f32 + rf;
        let bottom = (y + h as i64) as f32 - rf;

        for py in span.y0..span.y1 {
            let cy = py as f32 + 0.5;
            let dy = if cy < top {
                top - cy
            } else if cy > bottom {
                cy - bottom
            } else {
                0.0
            };
            for px in span.x0..span.x1 {
                let cx = px as f32 + 0.5;
                let dx = if cx < left {
                    left - cx
                } else if cx > right {
                    cx - right
                } else {
                    0.0
                };
                if dx * dx + dy * dy <= rf * rf {
                    self.image.put_pixel(px, py, color);
                }
            }
        }
    }

    /// Fill a disc centered at `(cx, cy)`.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let y_start = (cy - radius).floor().max(0.0) as i64;
        let y_end = ((cy + radius).ceil() as i64).min(self.height() as i64);
        for py in y_start..y_end {
            let dy = py as f32 + 0.5 - cy;
            let rem = radius * radius - dy * dy;
            if rem < 0.0 {
                continue;
            }
            let half = rem.sqrt();
            let x0 = (cx - half - 0.5).ceil() as i64;
            let x1 = (cx + half - 0.5).floor() as i64;
            if x1 >= x0 {
                self.fill_rect(x0, py, (x1 - x0 + 1) as u32, 1, color);
            }
        }
    }

    /// Composite `color` over the pixel at `(x, y)` with the given opacity.
    #[inline]
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color, alpha: f32) {
        let b = self.bounds();
        if x < b.x0 as i64 || y < b.y0 as i64 || x >= b.x1 as i64 || y >= b.y1 as i64 {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        *dst = blend(*dst, color, a);
    }

    /// Composite a translucent rectangle.
    pub fn blend_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Color, alpha: f32) {
        let Some(span) = self.clip_rect(x, y, w as i64, h as i64) else {
            return;
        };
        for py in span.y0..span.y1 {
            self.blend_run(py as i64, span.x0 as i64, span.x1 as i64 - 1, color, alpha);
        }
    }

    fn blend_run(&mut self, y: i64, x0: i64, x1: i64, color: Color, alpha: f32) {
        for x in x0..=x1 {
            self.blend_pixel(x, y, color, alpha);
        }
    }

    /// Draw a translucent line of the given thickness.
    ///
    /// Scans along the major axis, so the cost is proportional to the line's
    /// length times its thickness rather than to its bounding box.
    pub fn draw_line(
        &mut self,
        (x0, y0): (f32, f32),
        (x1, y1): (f32, f32),
        thickness: f32,
        color: Color,
        alpha: f32,
    ) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let len = (dx * dx + dy * dy).sqrt();
        if len < 1e-6 {
            self.fill_circle(x0, y0, thickness / 2.0, color);
            return;
        }
        let half = thickness.max(1.0) / 2.0;

        if dy.abs() >= dx.abs() {
            // Mostly vertical: one horizontal run per row.
            let half_run = half * len / dy.abs();
            let (ya, yb) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
            let start = ya.floor().max(0.0) as i64;
            let end = (yb.ceil() as i64).min(self.height() as i64);
            for py in start..end {
                let cy = (py as f32 + 0.5).clamp(ya, yb);
                let cx = x0 + (cy - y0) * dx / dy;
                let xa = (cx - half_run).round() as i64;
                let xb = (cx + half_run).round() as i64 - 1;
                self.blend_run(py, xa, xb.max(xa), color, alpha);
            }
        } else {
            let half_run = half * len / dx.abs();
            let (xa, xb) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
            let start = xa.floor().max(0.0) as i64;
            let end = (xb.ceil() as i64).min(self.width() as i64);
            for px in start..end {
                let cx = (px as f32 + 0.5).clamp(xa, xb);
                let cy = y0 + (cx - x0) * dy / dx;
                let ya = (cy - half_run).round() as i64;
                let yb = ((cy + half_run).round() as i64 - 1).max(ya);
                for py in ya..=yb {
                    self.blend_pixel(px, py, color, alpha);
                }
            }
        }
    }

    /// Draw a translucent ring centered at `(cx, cy)`.
    ///
    /// `radius` is the ring's centerline; the ring spans `thickness` pixels.
    pub fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, thickness: f32, color: Color, alpha: f32) {
        let half = thickness.max(1.0) / 2.0;
        let outer = radius + half;
        let inner = (radius - half).max(0.0);
        let start = (cy - outer).floor().max(0.0) as i64;
        let end = ((cy + outer).ceil() as i64).min(self.height() as i64);

        for py in start..end {
            let dy = py as f32 + 0.5 - cy;
            let outer_sq = outer * outer - dy * dy;
            if outer_sq < 0.0 {
                continue;
            }
            let xo = outer_sq.sqrt();
            let inner_sq = inner * inner - dy * dy;
            if inner_sq <= 0.0 {
                let a = (cx - xo - 0.5).ceil() as i64;
                let b = (cx + xo - 0.5).floor() as i64;
                self.blend_run(py, a, b, color, alpha);
                continue;
            }
            let xi = inner_sq.sqrt();
            // Left arc, then right arc.
            let la = (cx - xo - 0.5).ceil() as i64;
            let lb = (cx - xi - 0.5).floor() as i64;
            let ra = (cx + xi - 0.5).ceil() as i64;
            let rb = (cx + xo - 0.5).floor() as i64;
            self.blend_run(py, la, lb, color, alpha);
            self.blend_run(py, ra, rb, color, alpha);
        }
    }
}

/// Source-over blend of `src` onto `dst`.
#[inline]
pub fn blend(dst: Color, src: Color, alpha: f32) -> Color {
    let mix = |d: u8, s: u8| (d as f32 + (s as f32 - d as f32) * alpha).round().clamp(0.0, 255.0) as u8;
    Rgb([mix(dst[0], src[0]), mix(dst[1], src[1]), mix(dst[2], src[2])])
}
