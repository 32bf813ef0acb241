//! Seven-segment glyphs drawn from geometric primitives.
//!
//! Panel labels are drawn without any font: each digit is a set of rounded
//! bars laid out like a seven-segment display, and the decimal point is a
//! filled disc on the baseline. Thickness follows [`stroke_for`], so glyphs
//! stay crisp from 10px up to several hundred pixels.
//!
//! ```text
//!    AAAA
//!   F    B
//!   F    B
//!    GGGG
//!   E    C
//!   E    C
//!    DDDD
//! ```

use super::canvas::Canvas;
use super::palette::Color;
use super::scale::stroke_for;

pub const SEG_A: u8 = 1 << 0;
pub const SEG_B: u8 = 1 << 1;
pub const SEG_C: u8 = 1 << 2;
pub const SEG_D: u8 = 1 << 3;
pub const SEG_E: u8 = 1 << 4;
pub const SEG_F: u8 = 1 << 5;
pub const SEG_G: u8 = 1 << 6;

/// Active segments per digit, indexed by digit value.
pub const DIGIT_SEGMENTS: [u8; 10] = [
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,         // 0
    SEG_B | SEG_C,                                         // 1
    SEG_A | SEG_B | SEG_D | SEG_E | SEG_G,                 // 2
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_G,                 // 3
    SEG_B | SEG_C | SEG_F | SEG_G,                         // 4
    SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,                 // 5
    SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,         // 6
    SEG_A | SEG_B | SEG_C,                                 // 7
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G, // 8
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,         // 9
];

/// A drawable label character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Digit(u8),
    Dot,
}

impl Glyph {
    /// Map a character to a glyph; anything but `0-9` and `.` is `None`.
    pub fn from_char(ch: char) -> Option<Glyph> {
        match ch {
            '0'..='9' => Some(Glyph::Digit(ch as u8 - b'0')),
            '.' => Some(Glyph::Dot),
            _ => None,
        }
    }

    /// Segment mask for digits; the dot has none.
    pub fn segments(self) -> u8 {
        match self {
            Glyph::Digit(d) => DIGIT_SEGMENTS[d as usize % 10],
            Glyph::Dot => 0,
        }
    }
}

/// Horizontal space reserved for a decimal point.
#[inline]
pub fn dot_width(size: u32) -> u32 {
    ((size as f32 * 0.4).round() as u32).max(4)
}

/// Diameter of the decimal point disc.
#[inline]
pub fn dot_diameter(size: u32) -> u32 {
    (stroke_for(size) * 3 / 2).max(2)
}

/// Segment rectangles `(dx, dy, w, h)` relative to the glyph origin.
fn segment_rects(size: u32) -> [(u32, u32, u32, u32); 7] {
    let s = size;
    let t = stroke_for(s).min(s);
    let mid = (s - t) / 2;
    [
        (0, 0, s, t),                 // A
        (s - t, 0, t, mid + t),       // B
        (s - t, mid, t, s - mid),     // C
        (0, s - t, s, t),             // D
        (0, mid, t, s - mid),         // E
        (0, 0, t, mid + t),           // F
        (0, mid, s, t),               // G
    ]
}

/// Draw one label character with its top-left corner at `(x, y)`.
///
/// Digits fill a `size x size` box; the dot sits on the box's baseline.
/// Characters without a glyph draw nothing.
pub fn draw_glyph(canvas: &mut Canvas, ch: char, x: i64, y: i64, size: u32, color: Color) {
    if size == 0 {
        return;
    }
    match Glyph::from_char(ch) {
        Some(Glyph::Dot) => {
            let d = dot_diameter(size) as f32;
            let cx = x as f32 + dot_width(size) as f32 / 2.0;
            let cy = y as f32 + size as f32 - d / 2.0;
            canvas.fill_circle(cx, cy, d / 2.0, color);
        }
        Some(glyph) => {
            let radius = stroke_for(size) / 2;
            let mask = glyph.segments();
            for (i, (dx, dy, w, h)) in segment_rects(size).into_iter().enumerate() {
                if mask & (1 << i) != 0 {
                    canvas.fill_rounded_rect(x + dx as i64, y + dy as i64, w, h, radius, color);
                }
            }
        }
        None => {}
    }
}
