//! Serialization and rasterization of scenes.
//!
//! - [`svg`]: turns layers of nodes into SVG elements and documents
//! - [`raster`]: rasterizes SVG markup to a pixel buffer

pub mod raster;
pub mod svg;

pub use raster::{Raster, Rasterizer};

use thiserror::Error;

/// Errors raised while turning a scene into pixels.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to parse SVG markup: {0}")]
    Svg(String),

    #[error("cannot allocate a {width}x{height} pixel buffer")]
    Pixmap { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    Encode(String),
}
