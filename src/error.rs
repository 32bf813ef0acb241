//! # Error Types
//!
//! This module defines error types used throughout the pixelmap library.

use thiserror::Error;

/// Main error type for pixelmap operations
#[derive(Debug, Error)]
pub enum PixelMapError {
    /// Surface description that cannot be rendered
    #[error("Invalid surface: {0}")]
    InvalidSurface(String),

    /// Canvas would exceed the configured size limits
    #[error("Canvas too large: {0}")]
    CanvasTooLarge(String),

    /// Font loading or text layout error
    #[error("Font error: {0}")]
    Font(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// HTTP server errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
