//! # Surface and Render Configuration
//!
//! Request-level types describing one LED surface and which decorations to
//! draw on its pixel map.
//!
//! Parsing is deliberately permissive: a missing field, a `null`, a value of
//! the wrong type or an out-of-range number is replaced by the field's default
//! instead of failing the request. Integers are accepted as JSON numbers or as
//! numeric strings, booleans as `true`/`false`, `"true"`/`"false"` or `0`/`1`.
//!
//! ## Example
//!
//! ```
//! use pixelmap::surface::SurfaceSpec;
//!
//! let surface: SurfaceSpec = serde_json::from_str(
//!     r#"{"panelsWidth": 4, "fullPanelsHeight": "3", "panelPixelWidth": 128}"#,
//! ).unwrap();
//!
//! assert_eq!(surface.panels_width, 4);
//! assert_eq!(surface.full_panels_height, 3);
//! assert_eq!(surface.total_width(), 4 * 128);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PixelMapError;

/// Default number of panel columns.
pub const DEFAULT_PANELS_WIDTH: u32 = 10;
/// Default number of full-height panel rows.
pub const DEFAULT_FULL_PANELS_HEIGHT: u32 = 5;
/// Default per-panel pixel size (both axes).
pub const DEFAULT_PANEL_PIXELS: u32 = 200;

/// One logical LED surface: a grid of identical panels.
///
/// Total canvas width is `panels_width * panel_pixel_width`; total height is
/// `(full_panels_height + half_panels_height) * panel_pixel_height`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSurfaceSpec", rename_all = "camelCase")]
pub struct SurfaceSpec {
    pub panels_width: u32,
    pub full_panels_height: u32,
    /// Trailing "half" rows. They are painted with the full row pixel height.
    pub half_panels_height: u32,
    pub panel_pixel_width: u32,
    pub panel_pixel_height: u32,
    /// LED product name; only used to pick a color palette.
    pub led_name: String,
}

impl Default for SurfaceSpec {
    fn default() -> Self {
        Self {
            panels_width: DEFAULT_PANELS_WIDTH,
            full_panels_height: DEFAULT_FULL_PANELS_HEIGHT,
            half_panels_height: 0,
            panel_pixel_width: DEFAULT_PANEL_PIXELS,
            panel_pixel_height: DEFAULT_PANEL_PIXELS,
            led_name: String::new(),
        }
    }
}

/// Whether a panel row counts as a full or a half row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Full,
    Half,
}

impl SurfaceSpec {
    /// Convenience constructor for the common grid-only case.
    pub fn new(panels_width: u32, full_panels_height: u32, panel_pixel_width: u32, panel_pixel_height: u32) -> Self {
        Self {
            panels_width,
            full_panels_height,
            half_panels_height: 0,
            panel_pixel_width,
            panel_pixel_height,
            led_name: String::new(),
        }
    }

    /// Builder-style setter for the LED name.
    pub fn with_led_name(mut self, name: impl Into<String>) -> Self {
        self.led_name = name.into();
        self
    }

    /// Builder-style setter for trailing half rows.
    pub fn with_half_rows(mut self, rows: u32) -> Self {
        self.half_panels_height = rows;
        self
    }

    /// Number of panel rows of either kind.
    pub fn total_rows(&self) -> u64 {
        self.full_panels_height as u64 + self.half_panels_height as u64
    }

    /// Total number of panels on the surface.
    pub fn total_panels(&self) -> u64 {
        self.panels_width as u64 * self.total_rows()
    }

    /// Canvas width in pixels.
    pub fn total_width(&self) -> u64 {
        self.panels_width as u64 * self.panel_pixel_width as u64
    }

    /// Canvas height in pixels.
    pub fn total_height(&self) -> u64 {
        self.total_rows() * self.panel_pixel_height as u64
    }

    /// Rows in paint order: full rows first, then half rows.
    pub fn panel_rows(&self) -> impl Iterator<Item = (u32, RowKind)> {
        let full = self.full_panels_height;
        (0..full)
            .map(|row| (row, RowKind::Full))
            .chain((full..full.saturating_add(self.half_panels_height)).map(|row| (row, RowKind::Half)))
    }

    /// Reject surfaces that would produce an empty canvas.
    pub fn validate(&self) -> Result<(), PixelMapError> {
        if self.panels_width == 0 {
            return Err(PixelMapError::InvalidSurface(
                "panelsWidth must be at least 1".to_string(),
            ));
        }
        if self.total_rows() == 0 {
            return Err(PixelMapError::InvalidSurface(
                "surface has no panel rows (fullPanelsHeight + halfPanelsHeight is 0)".to_string(),
            ));
        }
        if self.panel_pixel_width == 0 || self.panel_pixel_height == 0 {
            return Err(PixelMapError::InvalidSurface(
                "panel pixel dimensions must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Which layers to draw on top of the panel colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRenderConfig", rename_all = "camelCase")]
pub struct RenderConfig {
    pub show_grid: bool,
    pub show_panel_numbers: bool,
    pub show_name: bool,
    pub show_cross: bool,
    pub show_circle: bool,
    pub surface_name: String,
    /// Zero-based surface index, shown as "Screen N" when no name is given.
    pub surface_index: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_panel_numbers: true,
            show_name: false,
            show_cross: false,
            show_circle: false,
            surface_name: String::new(),
            surface_index: 0,
        }
    }
}

impl RenderConfig {
    /// Title drawn by the name overlay.
    pub fn display_name(&self) -> String {
        let name = self.surface_name.trim();
        if name.is_empty() {
            format!("Screen {}", self.surface_index as u64 + 1)
        } else {
            name.to_string()
        }
    }
}

/// Body of a pixel-map request: `{"surface": {...}, "config": {...}}`.
///
/// Either part may be missing or malformed; it then takes its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPixelMapRequest")]
pub struct PixelMapRequest {
    pub surface: SurfaceSpec,
    pub config: RenderConfig,
}

impl PixelMapRequest {
    /// Parse a request body. Only bodies that are not JSON at all fail.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

// ============================================================================
// LENIENT PARSING
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct RawSurfaceSpec {
    #[serde(default, alias = "panels_width")]
    #[serde(rename = "panelsWidth")]
    panels_width: Option<Value>,
    #[serde(default, alias = "full_panels_height")]
    #[serde(rename = "fullPanelsHeight")]
    full_panels_height: Option<Value>,
    #[serde(default, alias = "half_panels_height")]
    #[serde(rename = "halfPanelsHeight")]
    half_panels_height: Option<Value>,
    #[serde(default, alias = "panel_pixel_width")]
    #[serde(rename = "panelPixelWidth")]
    panel_pixel_width: Option<Value>,
    #[serde(default, alias = "panel_pixel_height")]
    #[serde(rename = "panelPixelHeight")]
    panel_pixel_height: Option<Value>,
    #[serde(default, alias = "led_name")]
    #[serde(rename = "ledName")]
    led_name: Option<Value>,
}

impl From<RawSurfaceSpec> for SurfaceSpec {
    fn from(raw: RawSurfaceSpec) -> Self {
        let d = SurfaceSpec::default();
        Self {
            panels_width: positive_or(raw.panels_width.as_ref(), d.panels_width),
            full_panels_height: count_or(raw.full_panels_height.as_ref(), d.full_panels_height),
            half_panels_height: count_or(raw.half_panels_height.as_ref(), d.half_panels_height),
            panel_pixel_width: positive_or(raw.panel_pixel_width.as_ref(), d.panel_pixel_width),
            panel_pixel_height: positive_or(raw.panel_pixel_height.as_ref(), d.panel_pixel_height),
            led_name: string_or(raw.led_name.as_ref(), d.led_name),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawRenderConfig {
    #[serde(default, alias = "show_grid")]
    #[serde(rename = "showGrid")]
    show_grid: Option<Value>,
    #[serde(default, alias = "show_panel_numbers")]
    #[serde(rename = "showPanelNumbers")]
    show_panel_numbers: Option<Value>,
    #[serde(default, alias = "show_name")]
    #[serde(rename = "showName")]
    show_name: Option<Value>,
    #[serde(default, alias = "show_cross")]
    #[serde(rename = "showCross")]
    show_cross: Option<Value>,
    #[serde(default, alias = "show_circle")]
    #[serde(rename = "showCircle")]
    show_circle: Option<Value>,
    #[serde(default, alias = "surface_name")]
    #[serde(rename = "surfaceName")]
    surface_name: Option<Value>,
    #[serde(default, alias = "surface_index")]
    #[serde(rename = "surfaceIndex")]
    surface_index: Option<Value>,
}

impl From<RawRenderConfig> for RenderConfig {
    fn from(raw: RawRenderConfig) -> Self {
        let d = RenderConfig::default();
        Self {
            show_grid: bool_or(raw.show_grid.as_ref(), d.show_grid),
            show_panel_numbers: bool_or(raw.show_panel_numbers.as_ref(), d.show_panel_numbers),
            show_name: bool_or(raw.show_name.as_ref(), d.show_name),
            show_cross: bool_or(raw.show_cross.as_ref(), d.show_cross),
            show_circle: bool_or(raw.show_circle.as_ref(), d.show_circle),
            surface_name: string_or(raw.surface_name.as_ref(), d.surface_name),
            surface_index: count_or(raw.surface_index.as_ref(), d.surface_index),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPixelMapRequest {
    surface: Option<Value>,
    config: Option<Value>,
}

impl From<RawPixelMapRequest> for PixelMapRequest {
    fn from(raw: RawPixelMapRequest) -> Self {
        Self {
            surface: raw
                .surface
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or_default(),
            config: raw
                .config
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or_default(),
        }
    }
}

/// Parse a non-negative integer from a number or numeric string.
///
/// Fractional values are truncated ("12.0" and 12.7 both give 12).
fn parse_count(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !n.is_finite() || n < 0.0 || n > u32::MAX as f64 {
        return None;
    }
    Some(n as u32)
}

fn count_or(value: Option<&Value>, default: u32) -> u32 {
    value.and_then(parse_count).unwrap_or(default)
}

fn positive_or(value: Option<&Value>, default: u32) -> u32 {
    value
        .and_then(parse_count)
        .filter(|&n| n > 0)
        .unwrap_or(default)
}

fn bool_or(value: Option<&Value>, default: bool) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f == 0.0 => false,
            Some(f) if f == 1.0 => true,
            _ => default,
        },
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => true,
            "false" | "0" | "no" | "off" => false,
            _ => default,
        },
        _ => default,
    }
}

fn string_or(value: Option<&Value>, default: String) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_camel_case_fields() {
        let surface: SurfaceSpec = serde_json::from_str(
            r#"{
                "panelsWidth": 20,
                "fullPanelsHeight": 4,
                "halfPanelsHeight": 1,
                "panelPixelWidth": 176,
                "panelPixelHeight": 88,
                "ledName": "Absen PL2.5"
            }"#,
        )
        .unwrap();

        assert_eq!(
            surface,
            SurfaceSpec {
                panels_width: 20,
                full_panels_height: 4,
                half_panels_height: 1,
                panel_pixel_width: 176,
                panel_pixel_height: 88,
                led_name: "Absen PL2.5".to_string(),
            }
        );
    }

    #[test]
    fn test_snake_case_aliases() {
        let surface: SurfaceSpec =
            serde_json::from_str(r#"{"panels_width": 3, "panel_pixel_height": 64}"#).unwrap();
        assert_eq!(surface.panels_width, 3);
        assert_eq!(surface.panel_pixel_height, 64);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let surface: SurfaceSpec = serde_json::from_str("{}").unwrap();
        assert_eq!(surface, SurfaceSpec::default());

        let config: RenderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RenderConfig::default());
        assert!(config.show_grid);
        assert!(config.show_panel_numbers);
        assert!(!config.show_name);
    }

    #[test]
    fn test_garbage_values_fall_back() {
        let surface: SurfaceSpec = serde_json::from_str(
            r#"{"panelsWidth": "wide", "fullPanelsHeight": -2, "panelPixelWidth": 0, "panelPixelHeight": null}"#,
        )
        .unwrap();
        assert_eq!(surface.panels_width, DEFAULT_PANELS_WIDTH);
        assert_eq!(surface.full_panels_height, DEFAULT_FULL_PANELS_HEIGHT);
        assert_eq!(surface.panel_pixel_width, DEFAULT_PANEL_PIXELS);
        assert_eq!(surface.panel_pixel_height, DEFAULT_PANEL_PIXELS);
    }

    #[test]
    fn test_numeric_strings_and_floats() {
        let surface: SurfaceSpec =
            serde_json::from_str(r#"{"panelsWidth": "12", "fullPanelsHeight": 3.0}"#).unwrap();
        assert_eq!(surface.panels_width, 12);
        assert_eq!(surface.full_panels_height, 3);
    }

    #[test]
    fn test_lenient_bools() {
        let config: RenderConfig = serde_json::from_str(
            r#"{"showGrid": "false", "showPanelNumbers": 0, "showCross": "yes", "showCircle": "maybe"}"#,
        )
        .unwrap();
        assert!(!config.show_grid);
        assert!(!config.show_panel_numbers);
        assert!(config.show_cross);
        assert!(!config.show_circle);
    }

    #[test]
    fn test_dimension_arithmetic() {
        let surface = SurfaceSpec::new(7, 3, 128, 96).with_half_rows(2);
        assert_eq!(surface.total_width(), 7 * 128);
        assert_eq!(surface.total_height(), (3 + 2) * 96);
        assert_eq!(surface.total_panels(), 35);
    }

    #[test]
    fn test_panel_rows_full_then_half() {
        let surface = SurfaceSpec::new(1, 2, 10, 10).with_half_rows(1);
        let rows: Vec<_> = surface.panel_rows().collect();
        assert_eq!(
            rows,
            vec![(0, RowKind::Full), (1, RowKind::Full), (2, RowKind::Half)]
        );
    }

    #[test]
    fn test_validate_rejects_empty_surface() {
        let surface = SurfaceSpec::new(4, 0, 100, 100);
        assert!(matches!(
            surface.validate(),
            Err(PixelMapError::InvalidSurface(_))
        ));
        assert!(SurfaceSpec::new(4, 0, 100, 100).with_half_rows(1).validate().is_ok());
    }

    #[test]
    fn test_display_name() {
        let mut config = RenderConfig::default();
        config.surface_index = 2;
        assert_eq!(config.display_name(), "Screen 3");
        config.surface_name = "Main Stage".to_string();
        assert_eq!(config.display_name(), "Main Stage");
    }

    #[test]
    fn test_display_name_at_last_index() {
        let req = PixelMapRequest::from_json(br#"{"config": {"surfaceIndex": 4294967295}}"#).unwrap();
        assert_eq!(req.config.surface_index, u32::MAX);
        assert_eq!(req.config.display_name(), "Screen 4294967296");
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_value(SurfaceSpec::new(2, 2, 200, 200)).unwrap();
        assert_eq!(json["panelsWidth"], 2);
        assert_eq!(json["panelPixelHeight"], 200);
    }

    #[test]
    fn test_request_envelope() {
        let req = PixelMapRequest::from_json(
            br#"{"surface": {"panelsWidth": 2, "fullPanelsHeight": 2}, "config": {"showGrid": false}}"#,
        )
        .unwrap();
        assert_eq!(req.surface.panels_width, 2);
        assert_eq!(req.surface.panel_pixel_width, DEFAULT_PANEL_PIXELS);
        assert!(!req.config.show_grid);
        assert!(req.config.show_panel_numbers);
    }

    #[test]
    fn test_request_with_malformed_parts_uses_defaults() {
        let req = PixelMapRequest::from_json(br#"{"surface": "4x2", "config": null}"#).unwrap();
        assert_eq!(req, PixelMapRequest::default());
        let req = PixelMapRequest::from_json(b"{}").unwrap();
        assert_eq!(req, PixelMapRequest::default());
    }

    #[test]
    fn test_request_rejects_non_json() {
        assert!(PixelMapRequest::from_json(b"not json").is_err());
    }
}
