//! Server state and configuration.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::error::PixelMapError;
use crate::render::limits::CanvasLimits;
use crate::render::text::TextFace;

/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Canvas size guard applied to every render
    pub limits: CanvasLimits,
    /// Optional TTF/OTF font for the name overlay (bitmap font otherwise)
    pub font_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            limits: CanvasLimits::default(),
            font_path: None,
        }
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// Face used for the name overlay, loaded once at startup.
    pub face: TextFace,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Build the state, loading the configured font if any.
    pub fn new(config: ServerConfig) -> Result<Self, PixelMapError> {
        let face = match &config.font_path {
            Some(path) => TextFace::from_file(path)?,
            None => TextFace::Bitmap,
        };
        Ok(Self {
            config,
            face,
            started_at: Utc::now(),
        })
    }
}
