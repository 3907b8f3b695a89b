//! Error types for Limner exports.
//!
//! [`ExportError`] separates input errors, which are raised before an export
//! allocates anything, from rendering and resource errors raised afterwards.
//! Either way the export stage and its container are already released by the
//! time the error reaches the caller.

use std::io;

use thiserror::Error;

use limner_core::render::RenderError;

/// The main error type for Limner exports.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("surface not available")]
    SurfaceUnavailable,

    #[error("nothing to export: the diagram has no items")]
    NothingToExport,

    #[error("unsupported format `{0}`")]
    UnsupportedFormat(String),

    #[error("invalid export option: {0}")]
    InvalidOption(String),

    #[error("export stage has not been drawn")]
    StageNotDrawn,

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("failed to decode image: {0}")]
    ImageDecode(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ExportError {
    /// Returns `true` for errors caused by the caller's input rather than by
    /// rendering or I/O.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::SurfaceUnavailable
                | Self::NothingToExport
                | Self::UnsupportedFormat(_)
                | Self::InvalidOption(_)
        )
    }
}
