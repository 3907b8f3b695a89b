//! Rasterization of SVG markup with `resvg`.

use std::sync::Arc;

use log::debug;
use resvg::tiny_skia;
use usvg::fontdb;

use super::RenderError;

/// Turns SVG markup into pixels.
///
/// Holds the font database used to shape text; loading system fonts is costly,
/// so one rasterizer is meant to be shared by many exports.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    fontdb: Arc<fontdb::Database>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    /// Creates a rasterizer with an empty font database. Text is skipped.
    pub fn new() -> Self {
        Self {
            fontdb: Arc::new(fontdb::Database::new()),
        }
    }

    /// Creates a rasterizer that renders text with the fonts installed on the system.
    pub fn with_system_fonts() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        debug!(faces = db.len(); "Loaded system fonts");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Rasterizes `markup` at `pixel_ratio` device pixels per SVG unit.
    ///
    /// The output is `ceil(width * pixel_ratio)` by `ceil(height * pixel_ratio)`
    /// pixels, where width and height come from the document's own size.
    pub fn rasterize(&self, markup: &str, pixel_ratio: f32) -> Result<Raster, RenderError> {
        let options = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(markup, &options)
            .map_err(|err| RenderError::Svg(err.to_string()))?;

        let size = tree.size();
        let width = pixel_extent(size.width(), pixel_ratio);
        let height = pixel_extent(size.height(), pixel_ratio);
        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(RenderError::Pixmap { width, height })?;

        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(pixel_ratio, pixel_ratio),
            &mut pixmap.as_mut(),
        );
        debug!(width = width, height = height, pixel_ratio = pixel_ratio; "Rasterized SVG");

        Ok(Raster { pixmap })
    }
}

fn pixel_extent(units: f32, pixel_ratio: f32) -> u32 {
    (units * pixel_ratio).ceil().max(1.0) as u32
}

/// A rasterized image.
#[derive(Debug, Clone)]
pub struct Raster {
    pixmap: tiny_skia::Pixmap,
}

impl Raster {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Returns the straight-alpha RGBA color of a pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    /// Returns all pixels as straight-alpha RGBA bytes, row by row.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Returns all pixels as RGB bytes, dropping alpha.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue()]
            })
            .collect()
    }

    /// Encodes the image as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap
            .encode_png()
            .map_err(|err| RenderError::Encode(err.to_string()))
    }
}
