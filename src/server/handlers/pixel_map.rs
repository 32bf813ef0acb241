//! Pixel map generation handler.
//!
//! The body is parsed permissively: anything that is JSON is accepted and
//! missing or malformed fields take their defaults. Only bodies that are not
//! JSON at all, invalid surfaces and canvases over the limit are errors, and
//! all of them are answered with `{"success": false, "error": ...}` and
//! HTTP 500.

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::PixelMapError;
use crate::render::{self, encode};
use crate::surface::PixelMapRequest;

use super::super::state::AppState;

type ErrorResponse = (StatusCode, Json<Value>);

fn error_response(message: String) -> ErrorResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"success": false, "error": message})),
    )
}

/// Encoded result of one render, ready to be sent back.
struct Encoded {
    width: u32,
    height: u32,
    png_len: usize,
    data_uri: String,
    plan: render::limits::CanvasPlan,
    palette: &'static str,
}

/// POST /generate-pixel-map - Render a surface and return it as a PNG data URI.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ErrorResponse> {
    let request_id = Uuid::new_v4();

    let request = PixelMapRequest::from_json(&body).map_err(|e| {
        warn!(%request_id, error = %e, "Rejected unparseable request body");
        error_response(format!("Invalid request body: {}", e))
    })?;
    let PixelMapRequest { surface, config } = request;

    info!(
        %request_id,
        panels_width = surface.panels_width,
        full_rows = surface.full_panels_height,
        half_rows = surface.half_panels_height,
        panel_width = surface.panel_pixel_width,
        panel_height = surface.panel_pixel_height,
        led = %surface.led_name,
        "Generating pixel map"
    );

    let render_state = state.clone();
    let (render_surface, render_config) = (surface.clone(), config.clone());
    let result = tokio::task::spawn_blocking(move || {
        let map = render::render_pixel_map(
            &render_surface,
            &render_config,
            &render_state.config.limits,
            &render_state.face,
        )?;
        let png = map.to_png()?;
        Ok::<_, PixelMapError>(Encoded {
            width: map.width(),
            height: map.height(),
            png_len: png.len(),
            data_uri: encode::to_data_uri(&png),
            plan: map.plan,
            palette: map.palette,
        })
    })
    .await;

    let encoded = match result {
        Ok(Ok(encoded)) => encoded,
        Ok(Err(e)) => {
            warn!(%request_id, error = %e, "Pixel map render failed");
            return Err(error_response(e.to_string()));
        }
        Err(e) => {
            error!(%request_id, error = %e, "Render task failed");
            return Err(error_response(format!("Render task failed: {}", e)));
        }
    };

    let file_size_mb = encode::size_mb(encoded.png_len);
    info!(
        %request_id,
        width = encoded.width,
        height = encoded.height,
        scale = encoded.plan.scale_factor,
        bytes = encoded.png_len,
        "Pixel map ready"
    );

    Ok(Json(json!({
        "success": true,
        "image_base64": encoded.data_uri,
        "imageData": encoded.data_uri,
        "dimensions": {
            "width": encoded.width,
            "height": encoded.height,
        },
        "original_dimensions": {
            "width": encoded.plan.original_width,
            "height": encoded.plan.original_height,
        },
        "scale_factor": encoded.plan.scale_factor,
        "downscaled": encoded.plan.downscaled(),
        "file_size_mb": file_size_mb,
        "surface": {
            "panelsWidth": surface.panels_width,
            "fullPanelsHeight": surface.full_panels_height,
            "halfPanelsHeight": surface.half_panels_height,
            "panelPixelWidth": surface.panel_pixel_width,
            "panelPixelHeight": surface.panel_pixel_height,
            "effectivePanelWidth": encoded.plan.panel_width,
            "effectivePanelHeight": encoded.plan.panel_height,
            "ledName": surface.led_name,
            "palette": encoded.palette,
            "totalPanels": surface.total_panels(),
        },
        "config": config,
    })))
}
