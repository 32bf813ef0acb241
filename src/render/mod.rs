//! # Rendering Module
//!
//! Turns a [`SurfaceSpec`] and a [`RenderConfig`] into an RGB pixel map of the
//! LED wall: one colored rectangle per panel, optional borders and
//! `"row.col"` labels, then optional canvas-wide overlays.
//!
//! ## Modules
//!
//! - [`limits`]: canvas size guard (downscale or reject oversized walls)
//! - [`palette`]: brand color tables, border brightening, label contrast
//! - [`scale`]: label size, margins and border width from panel pixel size
//! - [`canvas`]: clipped raster primitives over `image::RgbImage`
//! - [`glyph`]: seven-segment digits and the decimal point
//! - [`label`]: left-to-right label layout
//! - [`grid`]: the panel grid pass
//! - [`text`]: bitmap/TrueType text for the title overlay
//! - [`overlay`]: name, cross and circle
//! - [`encode`]: PNG and base64 data URIs
//!
//! ## Usage Example
//!
//! ```
//! use pixelmap::render::{self, limits::CanvasLimits, text::TextFace};
//! use pixelmap::surface::{RenderConfig, SurfaceSpec};
//!
//! let surface = SurfaceSpec::new(4, 2, 128, 128).with_led_name("Absen");
//! let map = render::render_pixel_map(
//!     &surface,
//!     &RenderConfig::default(),
//!     &CanvasLimits::default(),
//!     &TextFace::Bitmap,
//! )
//! .unwrap();
//!
//! assert_eq!((map.width(), map.height()), (512, 256));
//! let png = map.to_png().unwrap();
//! assert!(!png.is_empty());
//! ```

pub mod canvas;
pub mod encode;
pub mod glyph;
pub mod grid;
pub mod label;
pub mod limits;
pub mod overlay;
pub mod palette;
pub mod scale;
pub mod text;

use canvas::Canvas;
use grid::{GridStats, paint_grid};
use limits::{CanvasLimits, CanvasPlan};
use overlay::{OverlayStats, paint_overlays};
use palette::{BLACK, Palette};
use text::TextFace;

use crate::error::PixelMapError;
use crate::surface::{RenderConfig, SurfaceSpec};

/// A finished pixel map and what went into it.
pub struct RenderedMap {
    pub canvas: Canvas,
    pub plan: CanvasPlan,
    /// Name of the palette picked from the LED name.
    pub palette: &'static str,
    pub grid: GridStats,
    pub overlays: OverlayStats,
}

impl RenderedMap {
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    pub fn to_png(&self) -> Result<Vec<u8>, PixelMapError> {
        encode::encode_png(self.canvas.image())
    }
}

/// Render the pixel map for one surface.
///
/// Plans the canvas against `limits`, paints the grid, then the overlays.
/// The result depends only on the arguments.
pub fn render_pixel_map(
    surface: &SurfaceSpec,
    config: &RenderConfig,
    limits: &CanvasLimits,
    face: &TextFace,
) -> Result<RenderedMap, PixelMapError> {
    let plan = limits.plan(surface)?;
    if plan.downscaled() {
        tracing::debug!(
            original_width = plan.original_width,
            original_height = plan.original_height,
            width = plan.width,
            height = plan.height,
            scale = plan.scale_factor,
            "Downscaled oversized canvas"
        );
    }

    let mut canvas = Canvas::new(plan.width, plan.height, BLACK);
    let grid = paint_grid(&mut canvas, surface, &plan, config);
    if grid.skipped_labels > 0 {
        tracing::debug!(
            skipped = grid.skipped_labels,
            drawn = grid.labels,
            "Left out panel labels wider than their panel"
        );
    }
    let overlays = paint_overlays(&mut canvas, config, face)?;

    Ok(RenderedMap {
        canvas,
        plan,
        palette: Palette::for_led(&surface.led_name).name,
        grid,
        overlays,
    })
}
