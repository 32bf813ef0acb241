//! Panel label composition.
//!
//! Lays a label such as `"12.5"` out left to right: each digit advances the
//! cursor by `size + spacing`, a decimal point by [`dot_width`], and any other
//! character by the digit advance without drawing anything.

use super::canvas::Canvas;
use super::glyph::{Glyph, dot_width, draw_glyph};
use super::palette::Color;

/// Gap between consecutive digits.
#[inline]
pub fn spacing_for(size: u32) -> u32 {
    (size / 8).max(2)
}

/// Cursor advance after a digit (and after unknown characters).
#[inline]
pub fn digit_advance(size: u32) -> u32 {
    size + spacing_for(size)
}

/// Cursor advance after a decimal point.
#[inline]
pub fn dot_advance(size: u32) -> u32 {
    dot_width(size)
}

/// A character positioned within a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedGlyph {
    /// `None` for characters that are skipped.
    pub glyph: Option<Glyph>,
    pub ch: char,
    /// Offset from the label's left edge.
    pub offset: u32,
}

/// Positions of every character of a label, plus its total advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelLayout {
    pub glyphs: Vec<PlacedGlyph>,
    pub advance: u32,
}

/// Lay out `text` at glyph size `size`.
pub fn layout_label(text: &str, size: u32) -> LabelLayout {
    let mut glyphs = Vec::with_capacity(text.len());
    let mut cursor = 0u32;
    for ch in text.chars() {
        let glyph = Glyph::from_char(ch);
        glyphs.push(PlacedGlyph {
            glyph,
            ch,
            offset: cursor,
        });
        cursor += match glyph {
            Some(Glyph::Dot) => dot_advance(size),
            _ => digit_advance(size),
        };
    }
    LabelLayout {
        glyphs,
        advance: cursor,
    }
}

/// Total horizontal advance of `text` at glyph size `size`.
pub fn label_advance(text: &str, size: u32) -> u32 {
    layout_label(text, size).advance
}

/// Width actually inked by `text`: the advance without the trailing gap.
pub fn label_width(text: &str, size: u32) -> u32 {
    let layout = layout_label(text, size);
    match layout.glyphs.last() {
        Some(last) => match last.glyph {
            Some(Glyph::Dot) => last.offset + dot_width(size),
            _ => last.offset + size,
        },
        None => 0,
    }
}

/// Draw `text` with its top-left corner at `(x, y)`.
///
/// Returns the total horizontal advance.
pub fn draw_label(canvas: &mut Canvas, text: &str, x: i64, y: i64, size: u32, color: Color) -> u32 {
    let layout = layout_label(text, size);
    for placed in &layout.glyphs {
        if placed.glyph.is_some() {
            draw_glyph(canvas, placed.ch, x + placed.offset as i64, y, size, color);
        }
    }
    layout.advance
}

/// Text of the label for the panel at zero-based `(row, col)`.
#[inline]
pub fn panel_label(row: u32, col: u32) -> String {
    format!("{}.{}", row as u64 + 1, col as u64 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::palette::{BLACK, WHITE};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_layout_twelve_point_five() {
        let size = 20;
        let spacing = spacing_for(size);
        assert_eq!(spacing, 2);

        let layout = layout_label("12.5", size);
        let kinds: Vec<Option<Glyph>> = layout.glyphs.iter().map(|g| g.glyph).collect();
        assert_eq!(
            kinds,
            vec![
                Some(Glyph::Digit(1)),
                Some(Glyph::Digit(2)),
                Some(Glyph::Dot),
                Some(Glyph::Digit(5)),
            ]
        );
        assert_eq!(
            layout.advance,
            2 * (size + spacing) + dot_width(size) + (size + spacing)
        );
        assert_eq!(layout.advance, 74);
        let offsets: Vec<u32> = layout.glyphs.iter().map(|g| g.offset).collect();
        assert_eq!(offsets, vec![0, 22, 44, 52]);
        assert_eq!(label_advance("12.5", size), 74);
        assert_eq!(label_width("12.5", size), 72);
    }

    #[test]
    fn test_label_width_matches_ink() {
        assert_eq!(label_width("", 10), 0);
        assert_eq!(label_width("1.", 10), 12 + dot_width(10));
        let mut canvas = Canvas::new(60, 20, BLACK);
        draw_label(&mut canvas, "1.11", 0, 0, 10, WHITE);
        let max_x = canvas
            .image()
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == WHITE)
            .map(|(x, _, _)| x)
            .max()
            .unwrap();
        assert_eq!(max_x + 1, label_width("1.11", 10));
    }

    #[test]
    fn test_unknown_characters_advance_like_digits() {
        let layout = layout_label("1a2", 16);
        assert_eq!(layout.glyphs[1].glyph, None);
        assert_eq!(layout.advance, 3 * digit_advance(16));
    }

    #[test]
    fn test_spacing_floor() {
        assert_eq!(spacing_for(8), 2);
        assert_eq!(spacing_for(15), 2);
        assert_eq!(spacing_for(80), 10);
    }

    #[test]
    fn test_empty_label() {
        let layout = layout_label("", 30);
        assert!(layout.glyphs.is_empty());
        assert_eq!(layout.advance, 0);
    }

    #[test]
    fn test_draw_label_matches_layout() {
        let mut canvas = Canvas::new(100, 30, BLACK);
        let advance = draw_label(&mut canvas, "12.5", 2, 2, 20, WHITE);
        assert_eq!(advance, 74);
        let max_x = canvas
            .image()
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == WHITE)
            .map(|(x, _, _)| x)
            .max()
            .unwrap();
        // Last digit starts at 2 + 52 and is 20px wide.
        assert_eq!(max_x, 2 + 52 + 19);
    }

    #[test]
    fn test_draw_label_is_pure() {
        let mut a = Canvas::new(120, 40, BLACK);
        let mut b = Canvas::new(120, 40, BLACK);
        draw_label(&mut a, "3.7", 5, 5, 24, WHITE);
        draw_label(&mut b, "9.9", 5, 5, 24, WHITE);
        let mut c = Canvas::new(120, 40, BLACK);
        draw_label(&mut c, "3.7", 5, 5, 24, WHITE);
        assert_eq!(a.as_bytes(), c.as_bytes());
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_panel_label_is_one_indexed() {
        assert_eq!(panel_label(0, 0), "1.1");
        assert_eq!(panel_label(2, 6), "3.7");
        assert_eq!(panel_label(11, 4), "12.5");
    }
}
