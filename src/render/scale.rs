//! Adaptive label sizing.
//!
//! Label size, margin and stroke thickness depend only on the pixel size of a
//! single panel. Tiling the same panel hardware into a wider or taller
//! surface therefore yields identical labels.
//!
//! | Quantity | Rule |
//! |----------|------|
//! | label size | `round(min(w, h) * 0.12)`, clamped to 10..=240 |
//! | margin | `round(w * 0.04)`, `round(h * 0.04)`, at least 3 |
//! | stroke | `max(1, size / 8)` |
//! | border | 1px, 2px from 400px panels, 3px from 800px panels |
//!
//! Panels smaller than 20px on either side get no label at all.

/// Label size as a fraction of the smaller panel side.
pub const LABEL_SIZE_RATIO: f32 = 0.12;
/// Smallest label size that is still drawn.
pub const MIN_LABEL_SIZE: u32 = 10;
/// Largest label size, regardless of panel size.
pub const MAX_LABEL_SIZE: u32 = 240;
/// Panels whose smaller side is below this get no label.
pub const MIN_LABELED_PANEL: u32 = 20;
/// Margin from the panel's top-left corner as a fraction of the panel side.
pub const MARGIN_RATIO: f32 = 0.04;
/// Smallest margin in pixels.
pub const MIN_MARGIN: u32 = 3;

/// Sizes used to place and draw one panel label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMetrics {
    /// Glyph box size (digits are `size x size`).
    pub size: u32,
    pub margin_x: u32,
    pub margin_y: u32,
    /// Segment thickness of digit glyphs.
    pub stroke: u32,
}

/// Compute label metrics for a panel of `panel_width x panel_height` pixels.
///
/// Returns `None` when the panel is too small for a legible label.
pub fn label_metrics(panel_width: u32, panel_height: u32) -> Option<LabelMetrics> {
    let min_side = panel_width.min(panel_height);
    if min_side < MIN_LABELED_PANEL {
        return None;
    }

    let size = ((min_side as f32 * LABEL_SIZE_RATIO).round() as u32).clamp(MIN_LABEL_SIZE, MAX_LABEL_SIZE);

    Some(LabelMetrics {
        size,
        margin_x: margin_for(panel_width),
        margin_y: margin_for(panel_height),
        stroke: stroke_for(size),
    })
}

#[inline]
fn margin_for(side: u32) -> u32 {
    ((side as f32 * MARGIN_RATIO).round() as u32).max(MIN_MARGIN)
}

/// Segment thickness for glyphs of the given size.
#[inline]
pub fn stroke_for(size: u32) -> u32 {
    (size / 8).max(1)
}

/// Grid border width for a panel of the given pixel size.
pub fn border_width(panel_width: u32, panel_height: u32) -> u32 {
    match panel_width.min(panel_height) {
        0..400 => 1,
        400..800 => 2,
        _ => 3,
    }
}
