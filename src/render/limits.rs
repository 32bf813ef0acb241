//! Canvas size guard.
//!
//! Large surfaces (thousands of panels at hundreds of pixels each) can ask
//! for canvases of several hundred megabytes. Before allocating, every render
//! is planned against [`CanvasLimits`]: a request that fits is drawn at full
//! size, one that does not is either shrunk uniformly or rejected, depending
//! on the [`OversizePolicy`].
//!
//! Downscaling shrinks the per-panel pixel size (rounding down, never below
//! 1px), so the grid arithmetic `width = panels * panel_width` still holds
//! for the effective panel size.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::PixelMapError;
use crate::surface::SurfaceSpec;

/// Default pixel-count ceiling (100 megapixels, ~300MB of RGB).
pub const DEFAULT_MAX_PIXELS: u64 = 100_000_000;
/// Default ceiling for either side of the canvas.
pub const DEFAULT_MAX_DIMENSION: u32 = 30_000;

/// What to do with a canvas that exceeds the limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OversizePolicy {
    /// Shrink panels uniformly until the canvas fits.
    #[default]
    Downscale,
    /// Fail the request.
    Reject,
}

impl FromStr for OversizePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "downscale" | "scale" => Ok(OversizePolicy::Downscale),
            "reject" | "error" => Ok(OversizePolicy::Reject),
            other => Err(format!("unknown oversize policy '{}' (expected downscale or reject)", other)),
        }
    }
}

impl fmt::Display for OversizePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OversizePolicy::Downscale => write!(f, "downscale"),
            OversizePolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Size ceilings applied to every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasLimits {
    pub max_pixels: u64,
    pub max_dimension: u32,
    pub policy: OversizePolicy,
}

impl Default for CanvasLimits {
    fn default() -> Self {
        Self {
            max_pixels: DEFAULT_MAX_PIXELS,
            max_dimension: DEFAULT_MAX_DIMENSION,
            policy: OversizePolicy::Downscale,
        }
    }
}

/// Resolved canvas geometry for one render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasPlan {
    pub width: u32,
    pub height: u32,
    /// Effective per-panel pixel size (after any downscaling).
    pub panel_width: u32,
    pub panel_height: u32,
    /// Requested canvas size before the guard.
    pub original_width: u64,
    pub original_height: u64,
    /// Shrink actually applied to panel sizes after rounding down, taken
    /// from the smaller of the two axes; 1.0 when not downscaled.
    pub scale_factor: f64,
}

impl CanvasPlan {
    pub fn downscaled(&self) -> bool {
        self.scale_factor < 1.0
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl CanvasLimits {
    fn fits(&self, width: u64, height: u64) -> bool {
        width.saturating_mul(height) <= self.max_pixels
            && width <= self.max_dimension as u64
            && height <= self.max_dimension as u64
    }

    /// Plan the canvas for `surface`.
    ///
    /// Fails for invalid surfaces, for oversized surfaces under
    /// [`OversizePolicy::Reject`], and for surfaces that stay too large even
    /// at one pixel per panel.
    pub fn plan(&self, surface: &SurfaceSpec) -> Result<CanvasPlan, PixelMapError> {
        surface.validate()?;

        let width = surface.total_width();
        let height = surface.total_height();

        if self.fits(width, height) {
            return Ok(CanvasPlan {
                width: width as u32,
                height: height as u32,
                panel_width: surface.panel_pixel_width,
                panel_height: surface.panel_pixel_height,
                original_width: width,
                original_height: height,
                scale_factor: 1.0,
            });
        }

        if self.policy == OversizePolicy::Reject {
            return Err(PixelMapError::CanvasTooLarge(format!(
                "{}x{} exceeds the limit of {} pixels / {}px per side",
                width, height, self.max_pixels, self.max_dimension
            )));
        }

        let by_area = (self.max_pixels as f64 / (width as f64 * height as f64)).sqrt();
        let by_side = self.max_dimension as f64 / width.max(height) as f64;
        let scale = by_area.min(by_side);

        let panel_width = ((surface.panel_pixel_width as f64 * scale).floor() as u32).max(1);
        let panel_height = ((surface.panel_pixel_height as f64 * scale).floor() as u32).max(1);
        let scaled_width = surface.panels_width as u64 * panel_width as u64;
        let scaled_height = surface.total_rows() * panel_height as u64;

        if !self.fits(scaled_width, scaled_height) {
            return Err(PixelMapError::CanvasTooLarge(format!(
                "{} panels do not fit in {} pixels / {}px per side even at 1px per panel",
                surface.total_panels(),
                self.max_pixels,
                self.max_dimension
            )));
        }

        Ok(CanvasPlan {
            width: scaled_width as u32,
            height: scaled_height as u32,
            panel_width,
            panel_height,
            original_width: width,
            original_height: height,
            scale_factor: (panel_width as f64 / surface.panel_pixel_width as f64)
                .min(panel_height as f64 / surface.panel_pixel_height as f64),
        })
    }
}
