//! Limner - export diagram scenes to PNG, JPEG, SVG and PDF.
//!
//! An export never draws the live editor surface. It draws a pruned clone of
//! it (an [export stage](stage::ExportStage)) attached to an off-screen
//! container, crops the result to the bounding box of the diagram items plus
//! padding, and encodes it. The stage and its container are released before
//! the export returns, successful or not.

pub mod config;
pub mod download;
pub mod options;
pub mod stage;
pub mod watermark;

mod bounds;
mod error;
mod export;

pub use limner_core::{color, geometry, scene};

pub use bounds::{PLACEHOLDER_BOUNDS, calculate_bounds};
pub use error::ExportError;
pub use export::{Blob, DocumentExport, ExportPayload, Orientation, PageGeometry};

use log::info;

use limner_core::{
    render::Rasterizer,
    scene::{CanvasItem, Host, Surface},
};

use config::AppConfig;
use options::{ExportFormat, ExportOptions};

/// Entry point for exporting diagrams.
///
/// An `Exporter` owns the [`Host`] that export stages attach to and the
/// rasterizer shared by raster and document exports. It is `Sync`; one
/// exporter can serve concurrent exports.
///
/// # Examples
///
/// ```rust
/// use limner::{
///     Exporter, ExportPayload,
///     geometry::Size,
///     options::ExportOptions,
///     scene::{CanvasItem, Layer, LayerKind, Node, Surface},
/// };
///
/// let surface = Surface::new(Size::new(400.0, 300.0)).with_layer(
///     Layer::new("content", LayerKind::Content)
///         .with_node(Node::rect("box", Size::new(120.0, 120.0), None)),
/// );
/// let items = [CanvasItem::new(0.0, 0.0, 120.0, 120.0)];
///
/// let exporter = Exporter::default();
/// let payload = exporter
///     .export(Some(&surface), &items, &ExportOptions::new("svg"))
///     .expect("Failed to export");
/// assert!(matches!(payload, ExportPayload::Markup(_)));
/// ```
#[derive(Debug, Default)]
pub struct Exporter {
    host: Host,
    rasterizer: Rasterizer,
}

impl Exporter {
    /// Creates an exporter configured by `config`.
    ///
    /// Loads the system fonts when `[render] system_fonts` is set.
    pub fn new(config: &AppConfig) -> Self {
        let rasterizer = if config.render().system_fonts() {
            Rasterizer::with_system_fonts()
        } else {
            Rasterizer::new()
        };
        Self::with_rasterizer(rasterizer)
    }

    /// Creates an exporter around an existing rasterizer.
    pub fn with_rasterizer(rasterizer: Rasterizer) -> Self {
        Self {
            host: Host::new(),
            rasterizer,
        }
    }

    /// The host export stages attach their containers to.
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Exports the diagram in the format named by `options`.
    ///
    /// Preconditions are checked in order, before anything is allocated:
    /// the surface must be available, there must be at least one item, the
    /// format must be supported and the remaining options must be valid.
    ///
    /// # Errors
    ///
    /// - [`ExportError::SurfaceUnavailable`] if `surface` is `None`.
    /// - [`ExportError::NothingToExport`] if `items` is empty.
    /// - [`ExportError::UnsupportedFormat`] for an unknown format.
    /// - [`ExportError::InvalidOption`] for an invalid scale, padding or
    ///   background.
    /// - Rendering, encoding and I/O errors from the selected renderer.
    pub fn export(
        &self,
        surface: Option<&Surface>,
        items: &[CanvasItem],
        options: &ExportOptions,
    ) -> Result<ExportPayload, ExportError> {
        let surface = surface.ok_or(ExportError::SurfaceUnavailable)?;
        if items.is_empty() {
            return Err(ExportError::NothingToExport);
        }
        let format = options.parse_format()?;
        options.validate()?;

        info!(format = format.name(), items = items.len(); "Exporting diagram");
        match format {
            ExportFormat::Png | ExportFormat::Jpeg => self
                .export_image(surface, items, options)
                .map(ExportPayload::Binary),
            ExportFormat::Svg => self
                .export_svg(surface, items, options)
                .map(ExportPayload::Markup),
            ExportFormat::Pdf => self
                .export_pdf(surface, items, options)
                .map(|document| ExportPayload::Binary(document.into_blob())),
        }
    }

    /// Exports a raster image in the PNG or JPEG format named by `options`.
    ///
    /// The image is `ceil(width * scale)` by `ceil(height * scale)` pixels,
    /// where width and height are those of the padded item bounds.
    ///
    /// # Errors
    ///
    /// Besides the renderer's own errors, an unknown format gives
    /// [`ExportError::UnsupportedFormat`] and a vector or document format
    /// gives [`ExportError::InvalidOption`].
    pub fn export_image(
        &self,
        surface: &Surface,
        items: &[CanvasItem],
        options: &ExportOptions,
    ) -> Result<Blob, ExportError> {
        if items.is_empty() {
            return Err(ExportError::NothingToExport);
        }
        let format = match options.parse_format()? {
            format @ (ExportFormat::Png | ExportFormat::Jpeg) => format,
            other => {
                return Err(ExportError::InvalidOption(format!(
                    "{} is not a raster format",
                    other.name()
                )));
            }
        };
        export::render_raster(
            surface,
            items,
            options,
            &self.host,
            &self.rasterizer,
            format,
            options.scale(),
        )
    }

    /// Exports SVG markup whose viewport is the padded item bounds.
    pub fn export_svg(
        &self,
        surface: &Surface,
        items: &[CanvasItem],
        options: &ExportOptions,
    ) -> Result<String, ExportError> {
        export::render_vector(surface, items, options, &self.host)
    }

    /// Exports a one-page PDF holding a PNG rendering at twice the scale.
    pub fn export_pdf(
        &self,
        surface: &Surface,
        items: &[CanvasItem],
        options: &ExportOptions,
    ) -> Result<DocumentExport, ExportError> {
        export::render_document(surface, items, options, &self.host, &self.rasterizer)
    }
}
