//! # Pixel Map Pipeline Tests
//!
//! End-to-end checks of request parsing, rendering and PNG encoding through
//! the public library API.
//!
//! ## Test Coverage
//!
//! - **Concrete scenarios**: the 2x2 wall with and without grid borders.
//! - **Invariants**: determinism, color-position invariance, label scaling
//!   independent of panel count, dimension arithmetic.
//! - **Size guard**: downscale and reject policies.

use pixelmap::render::encode::{self, PNG_DATA_URI_PREFIX};
use pixelmap::render::limits::{CanvasLimits, OversizePolicy};
use pixelmap::render::palette::{BORDER_BRIGHTEN, DEFAULT_PALETTE, Palette, brighten};
use pixelmap::render::text::TextFace;
use pixelmap::{PixelMapError, PixelMapRequest, RenderConfig, RenderedMap, SurfaceSpec, render_pixel_map};
use pretty_assertions::assert_eq;

fn render(request: &PixelMapRequest) -> RenderedMap {
    render_pixel_map(
        &request.surface,
        &request.config,
        &CanvasLimits::default(),
        &TextFace::Bitmap,
    )
    .unwrap()
}

fn request(json: &str) -> PixelMapRequest {
    PixelMapRequest::from_json(json.as_bytes()).unwrap()
}

// ============================================================================
// CONCRETE SCENARIOS
// ============================================================================

#[test]
fn test_two_by_two_grid_scenario() {
    let map = render(&request(
        r#"{
            "surface": {"panelsWidth": 2, "fullPanelsHeight": 2, "panelPixelWidth": 200, "panelPixelHeight": 200},
            "config": {"showGrid": true, "showPanelNumbers": false}
        }"#,
    ));
    let a = DEFAULT_PALETTE.colors[0];
    let b = DEFAULT_PALETTE.colors[1];

    assert_eq!((map.width(), map.height()), (400, 400));
    assert_eq!(map.grid.panels, 4);
    assert_eq!(map.canvas.pixel(100, 100), Some(a));
    assert_eq!(map.canvas.pixel(300, 100), Some(b));
    assert_eq!(map.canvas.pixel(199, 100), Some(brighten(a, BORDER_BRIGHTEN)));
}

#[test]
fn test_two_by_two_without_grid_scenario() {
    let map = render(&request(
        r#"{
            "surface": {"panelsWidth": 2, "fullPanelsHeight": 2, "panelPixelWidth": 200, "panelPixelHeight": 200},
            "config": {"showGrid": false, "showPanelNumbers": false}
        }"#,
    ));
    assert_eq!(map.canvas.pixel(199, 100), Some(DEFAULT_PALETTE.colors[0]));
}

#[test]
fn test_png_round_trip_preserves_pixels() {
    let map = render(&request(
        r#"{"surface": {"panelsWidth": 3, "fullPanelsHeight": 2, "panelPixelWidth": 64, "panelPixelHeight": 48}}"#,
    ));
    let png = map.to_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (192, 96));
    assert_eq!(decoded.as_raw(), map.canvas.as_bytes());

    let uri = encode::to_data_uri(&png);
    assert!(uri.starts_with(PNG_DATA_URI_PREFIX));
}

// ============================================================================
// INVARIANTS
// ============================================================================

#[test]
fn test_renders_are_byte_identical() {
    let req = request(
        r#"{
            "surface": {"panelsWidth": 8, "fullPanelsHeight": 3, "halfPanelsHeight": 1,
                        "panelPixelWidth": 96, "panelPixelHeight": 96, "ledName": "Unilumin UpadIV"},
            "config": {"showName": true, "showCross": true, "showCircle": true, "surfaceIndex": 1}
        }"#,
    );
    let first = render(&req);
    let second = render(&req);
    assert_eq!(first.canvas.as_bytes(), second.canvas.as_bytes());
    assert_eq!(first.palette, "unilumin");
}

#[test]
fn test_panel_color_depends_only_on_position() {
    let surface = SurfaceSpec::new(5, 4, 40, 40).with_led_name("Infiled AR3.9");
    let config = RenderConfig {
        show_grid: false,
        show_panel_numbers: false,
        ..Default::default()
    };
    let map = render_pixel_map(&surface, &config, &CanvasLimits::default(), &TextFace::Bitmap).unwrap();
    let palette = Palette::for_led("Infiled AR3.9");

    // Visit panels column-major; each center must carry its own (row, col) color.
    for col in 0..5 {
        for row in 0..4 {
            let center = map.canvas.pixel(col * 40 + 20, row * 40 + 20);
            assert_eq!(center, Some(palette.color_at(row, col)), "panel ({}, {})", row, col);
        }
    }
}

#[test]
fn test_label_size_ignores_panel_count() {
    let narrow = SurfaceSpec::new(20, 4, 100, 100);
    let wide = SurfaceSpec::new(80, 4, 100, 100);
    let config = RenderConfig::default();
    let limits = CanvasLimits::default();
    let a = render_pixel_map(&narrow, &config, &limits, &TextFace::Bitmap).unwrap();
    let b = render_pixel_map(&wide, &config, &limits, &TextFace::Bitmap).unwrap();
    assert_eq!(a.grid.label_metrics, b.grid.label_metrics);
    assert!(a.grid.label_metrics.is_some());

    // The first panel looks the same on both walls.
    for y in 0..100 {
        for x in 0..100 {
            assert_eq!(a.canvas.pixel(x, y), b.canvas.pixel(x, y));
        }
    }
}

#[test]
fn test_dimension_arithmetic_holds() {
    for (pw, fh, hh, ppw, pph) in [(1, 1, 0, 1, 1), (7, 3, 2, 33, 17), (16, 9, 1, 120, 60)] {
        let surface = SurfaceSpec::new(pw, fh, ppw, pph).with_half_rows(hh);
        let map = render_pixel_map(&surface, &RenderConfig::default(), &CanvasLimits::default(), &TextFace::Bitmap)
            .unwrap();
        assert_eq!(map.width(), pw * ppw);
        assert_eq!(map.height(), (fh + hh) * pph);
    }
}

#[test]
fn test_toggles_change_output() {
    let base = r#""surface": {"panelsWidth": 4, "fullPanelsHeight": 2, "panelPixelWidth": 150, "panelPixelHeight": 150}"#;
    let on = render(&request(&format!(r#"{{{}, "config": {{"showGrid": true, "showPanelNumbers": true}}}}"#, base)));
    let no_numbers = render(&request(&format!(r#"{{{}, "config": {{"showGrid": true, "showPanelNumbers": false}}}}"#, base)));
    let no_grid = render(&request(&format!(r#"{{{}, "config": {{"showGrid": false, "showPanelNumbers": true}}}}"#, base)));
    assert_ne!(on.canvas.as_bytes(), no_numbers.canvas.as_bytes());
    assert_ne!(on.canvas.as_bytes(), no_grid.canvas.as_bytes());
}

// ============================================================================
// SIZE GUARD
// ============================================================================

#[test]
fn test_oversized_wall_is_downscaled() {
    let surface = SurfaceSpec::new(200, 100, 500, 500);
    let limits = CanvasLimits {
        max_pixels: 5_000_000,
        max_dimension: 30_000,
        policy: OversizePolicy::Downscale,
    };
    let map = render_pixel_map(&surface, &RenderConfig::default(), &limits, &TextFace::Bitmap).unwrap();
    assert!(map.plan.downscaled());
    assert!(map.plan.scale_factor < 1.0);
    assert!(map.plan.pixel_count() <= 5_000_000);
    assert_eq!((map.plan.original_width, map.plan.original_height), (100_000, 50_000));
    assert_eq!(map.width(), 200 * map.plan.panel_width);
}

#[test]
fn test_oversized_wall_is_rejected() {
    let surface = SurfaceSpec::new(200, 100, 500, 500);
    let limits = CanvasLimits {
        max_pixels: 5_000_000,
        max_dimension: 30_000,
        policy: OversizePolicy::Reject,
    };
    let result = render_pixel_map(&surface, &RenderConfig::default(), &limits, &TextFace::Bitmap);
    assert!(matches!(result, Err(PixelMapError::CanvasTooLarge(_))));
}
