//! Panel grid painting.
//!
//! Walks the panel grid (full rows first, then half rows, all at the same
//! pixel height), fills each panel with its palette color, optionally strokes
//! an inset border in a brightened shade of the fill, and optionally draws
//! the panel's `"row.col"` label near its top-left corner.
//!
//! Label size depends only on the panel's pixel size. A label that would not
//! fit inside its panel at that size is skipped whole, never cut, so a panel
//! can't show a shorter label that belongs to another panel.

use super::canvas::Canvas;
use super::label::{draw_label, label_width, panel_label};
use super::limits::CanvasPlan;
use super::palette::{BORDER_BRIGHTEN, Color, Palette, brighten};
use super::scale::{LabelMetrics, border_width, label_metrics};
use crate::surface::{RenderConfig, RowKind, SurfaceSpec};

/// One panel's resolved geometry and colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelCell {
    pub row: u32,
    pub col: u32,
    pub kind: RowKind,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub fill: Color,
    /// Border color, present only when the grid is shown.
    pub border: Option<Color>,
    pub label: String,
}

/// Resolve every panel of `surface` in paint order.
pub fn panel_cells<'a>(
    surface: &'a SurfaceSpec,
    plan: &'a CanvasPlan,
    config: &'a RenderConfig,
    palette: Palette,
) -> impl Iterator<Item = PanelCell> + 'a {
    let (pw, ph) = (plan.panel_width, plan.panel_height);
    surface.panel_rows().flat_map(move |(row, kind)| {
        (0..surface.panels_width).map(move |col| {
            let fill = palette.color_at(row, col);
            PanelCell {
                row,
                col,
                kind,
                x: col * pw,
                y: row * ph,
                width: pw,
                height: ph,
                fill,
                border: config.show_grid.then(|| brighten(fill, BORDER_BRIGHTEN)),
                label: panel_label(row, col),
            }
        })
    })
}

/// Summary of a grid pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridStats {
    pub panels: u64,
    pub labels: u64,
    /// Labels left out because they overrun their panel.
    pub skipped_labels: u64,
    pub label_metrics: Option<LabelMetrics>,
    pub border_width: Option<u32>,
}

/// Paint the panel grid onto `canvas`.
pub fn paint_grid(
    canvas: &mut Canvas,
    surface: &SurfaceSpec,
    plan: &CanvasPlan,
    config: &RenderConfig,
) -> GridStats {
    let palette = Palette::for_led(&surface.led_name);
    let label_color = palette.label_color();
    let metrics = label_metrics(plan.panel_width, plan.panel_height);
    let border = border_width(plan.panel_width, plan.panel_height);
    let draw_labels = config.show_panel_numbers && metrics.is_some();

    let mut stats = GridStats {
        panels: 0,
        labels: 0,
        skipped_labels: 0,
        label_metrics: if config.show_panel_numbers { metrics } else { None },
        border_width: config.show_grid.then_some(border),
    };

    for cell in panel_cells(surface, plan, config, palette) {
        let (x, y) = (cell.x as i64, cell.y as i64);
        canvas.fill_rect(x, y, cell.width, cell.height, cell.fill);
        if let Some(border_color) = cell.border {
            canvas.stroke_rect(x, y, cell.width, cell.height, border, border_color);
        }
        if draw_labels && let Some(m) = metrics {
            if label_fits(&cell, &m) {
                draw_label(
                    canvas,
                    &cell.label,
                    x + m.margin_x as i64,
                    y + m.margin_y as i64,
                    m.size,
                    label_color,
                );
                stats.labels += 1;
            } else {
                stats.skipped_labels += 1;
            }
        }
        stats.panels += 1;
    }

    stats
}

fn label_fits(cell: &PanelCell, m: &LabelMetrics) -> bool {
    m.margin_x as u64 + label_width(&cell.label, m.size) as u64 <= cell.width as u64
        && m.margin_y as u64 + m.size as u64 <= cell.height as u64
}
