//! # HTTP Server for Pixel Map Generation
//!
//! Exposes the renderer over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! pixelmap serve --listen 0.0.0.0:8080 --max-pixels 100000000
//! ```
//!
//! ## Routes
//!
//! | Method | Path                  | Description                        |
//! |--------|-----------------------|------------------------------------|
//! | GET    | `/`                   | Health check (name, status, version) |
//! | POST   | `/generate-pixel-map` | Render a surface to a PNG data URI |

mod handlers;
mod state;

pub use state::{AppState, DEFAULT_LISTEN_ADDR, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::error::PixelMapError;

/// Build the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::health::index))
        .route("/generate-pixel-map", post(handlers::pixel_map::generate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use pixelmap::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), pixelmap::error::PixelMapError> {
/// let config = ServerConfig {
///     listen_addr: "127.0.0.1:8080".to_string(),
///     ..Default::default()
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), PixelMapError> {
    let app_state = Arc::new(AppState::new(config.clone())?);
    let app = router(app_state.clone());

    info!(
        listen = %config.listen_addr,
        max_pixels = config.limits.max_pixels,
        max_dimension = config.limits.max_dimension,
        oversize = %config.limits.policy,
        font = app_state.face.name(),
        "Pixel map server starting"
    );

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| PixelMapError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| PixelMapError::Server(e.to_string()))?;

    Ok(())
}
