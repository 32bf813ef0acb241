//! Panel color palettes.
//!
//! Panels are colored in a diagonal checkerboard: the color of panel
//! `(row, col)` is `colors[(row + col) % colors.len()]`. This only depends on
//! the panel's position, so a re-render is bit-for-bit identical regardless
//! of painting order.
//!
//! A few LED brands have their own palette, picked by a case-insensitive
//! substring match on the surface's LED name.

use image::Rgb;

/// 8-bit RGB color.
pub type Color = Rgb<u8>;

pub const BLACK: Color = Rgb([0, 0, 0]);
pub const WHITE: Color = Rgb([255, 255, 255]);

/// Blend factor toward white used for grid borders.
pub const BORDER_BRIGHTEN: f32 = 0.35;

/// A named, ordered set of panel colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub colors: &'static [Color],
}

pub const DEFAULT_PALETTE: Palette = Palette {
    name: "default",
    colors: &[Rgb([70, 130, 180]), Rgb([60, 179, 113])],
};

/// Brand palettes, matched in order against the lowercased LED name.
const BRAND_PALETTES: &[(&str, Palette)] = &[
    (
        "absen",
        Palette {
            name: "absen",
            colors: &[Rgb([230, 126, 34]), Rgb([41, 128, 185])],
        },
    ),
    (
        "unilumin",
        Palette {
            name: "unilumin",
            colors: &[Rgb([39, 174, 96]), Rgb([142, 68, 173]), Rgb([52, 73, 94])],
        },
    ),
    (
        "infiled",
        Palette {
            name: "infiled",
            colors: &[
                Rgb([22, 160, 133]),
                Rgb([243, 156, 18]),
                Rgb([127, 140, 141]),
                Rgb([41, 128, 185]),
            ],
        },
    ),
    (
        "roe",
        Palette {
            name: "roe",
            colors: &[Rgb([192, 57, 43]), Rgb([44, 62, 80])],
        },
    ),
    (
        "leyard",
        Palette {
            name: "leyard",
            colors: &[Rgb([211, 84, 0]), Rgb([26, 188, 156])],
        },
    ),
];

impl Palette {
    /// Pick the palette for an LED product name.
    ///
    /// Unknown or empty names get [`DEFAULT_PALETTE`].
    pub fn for_led(led_name: &str) -> Palette {
        let name = led_name.to_lowercase();
        BRAND_PALETTES
            .iter()
            .find(|(needle, _)| name.contains(needle))
            .map(|(_, palette)| *palette)
            .unwrap_or(DEFAULT_PALETTE)
    }

    /// Fill color of the panel at `(row, col)`.
    #[inline]
    pub fn color_at(&self, row: u32, col: u32) -> Color {
        let idx = (row as u64 + col as u64) % self.colors.len() as u64;
        self.colors[idx as usize]
    }

    /// Label color (black or white) readable on every color of this palette.
    ///
    /// Chooses the candidate whose worst-case contrast ratio across the
    /// palette is highest. White wins ties.
    pub fn label_color(&self) -> Color {
        let worst = |candidate: Color| {
            self.colors
                .iter()
                .map(|&c| contrast_ratio(candidate, c))
                .fold(f32::MAX, f32::min)
        };
        if worst(BLACK) > worst(WHITE) { BLACK } else { WHITE }
    }
}

/// Blend a color toward white.
///
/// Each channel becomes `c + (255 - c) * factor`, rounded and clamped to 255.
#[inline]
pub fn brighten(color: Color, factor: f32) -> Color {
    let f = factor.clamp(0.0, 1.0);
    let ch = |c: u8| {
        let c = c as f32;
        (c + (255.0 - c) * f).round().min(255.0) as u8
    };
    Rgb([ch(color[0]), ch(color[1]), ch(color[2])])
}

/// WCAG relative luminance of an sRGB color, in [0, 1].
pub fn relative_luminance(color: Color) -> f32 {
    let linear = |c: u8| {
        let c = c as f32 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(color[0]) + 0.7152 * linear(color[1]) + 0.0722 * linear(color[2])
}

/// WCAG contrast ratio between two colors, in [1, 21].
pub fn contrast_ratio(a: Color, b: Color) -> f32 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (hi, lo) = if la > lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}
