//! # Pixelmap - LED Wall Pixel Map Renderer
//!
//! Pixelmap draws the "pixel map" of an LED video wall: one colored rectangle
//! per panel, optional borders and `"row.col"` panel labels, and optional
//! overlays (surface name, diagonal cross, centered circle). It provides:
//!
//! - **Surface model**: permissive parsing of panel counts and sizes
//! - **Rendering**: grid painting, seven-segment labels, overlays, PNG output
//! - **Size guard**: downscaling or rejecting oversized canvases
//! - **HTTP server**: `POST /generate-pixel-map` returning a base64 PNG
//!
//! ## Quick Start
//!
//! ```
//! use pixelmap::{
//!     render::{self, limits::CanvasLimits, text::TextFace},
//!     surface::{RenderConfig, SurfaceSpec},
//! };
//!
//! let surface = SurfaceSpec::new(2, 2, 200, 200);
//! let config = RenderConfig {
//!     show_panel_numbers: false,
//!     ..Default::default()
//! };
//!
//! let map = render::render_pixel_map(&surface, &config, &CanvasLimits::default(), &TextFace::Bitmap)?;
//! assert_eq!((map.width(), map.height()), (400, 400));
//!
//! let png = map.to_png()?;
//! let uri = render::encode::to_data_uri(&png);
//! assert!(uri.starts_with("data:image/png;base64,"));
//! # Ok::<(), pixelmap::PixelMapError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`surface`] | Request types and lenient parsing |
//! | [`render`] | Canvas, grid, labels, overlays, encoding |
//! | [`server`] | axum HTTP service |
//! | [`error`] | Error types |

pub mod error;
pub mod render;
pub mod server;
pub mod surface;

// Re-exports for convenience
pub use error::PixelMapError;
pub use render::{RenderedMap, render_pixel_map};
pub use surface::{PixelMapRequest, RenderConfig, SurfaceSpec};
