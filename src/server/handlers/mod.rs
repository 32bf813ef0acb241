//! HTTP handlers for the server.

pub mod health;
pub mod pixel_map;
