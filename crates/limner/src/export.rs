//! Format renderers.
//!
//! Every renderer runs the same prologue: compute the padded region, build a
//! stage, put a background under everything, stamp the watermark on top and
//! draw. They differ only in how the drawn region is extracted.

mod document;
mod raster;
mod vector;

pub use document::{DocumentExport, Orientation, PageGeometry};

pub(crate) use document::render_document;
pub(crate) use raster::render_raster;
pub(crate) use vector::render_vector;

use limner_core::{
    color::Color,
    geometry::Bounds,
    scene::{CanvasItem, Host, Layer, LayerKind, Node, NodeRole, Surface},
};

use crate::{
    ExportError, calculate_bounds,
    options::ExportOptions,
    stage::{ExportStage, build_stage},
    watermark::apply_watermark,
};

/// Encoded bytes tagged with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    bytes: Vec<u8>,
    mime_type: String,
}

impl Blob {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Result of a dispatched export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportPayload {
    /// PNG, JPEG or PDF bytes.
    Binary(Blob),
    /// SVG markup.
    Markup(String),
}

impl ExportPayload {
    pub fn mime_type(&self) -> &str {
        match self {
            Self::Binary(blob) => blob.mime_type(),
            Self::Markup(_) => crate::options::ExportFormat::Svg.mime_type(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Binary(blob) => blob.bytes(),
            Self::Markup(markup) => markup.as_bytes(),
        }
    }
}

/// How the background is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Medium {
    Raster,
    Vector,
}

/// Runs the shared prologue and returns the drawn stage with the region to
/// extract.
fn prepare_stage<'h>(
    surface: &Surface,
    items: &[CanvasItem],
    options: &ExportOptions,
    host: &'h Host,
    medium: Medium,
) -> Result<(ExportStage<'h>, Bounds), ExportError> {
    if items.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    options.validate()?;
    let background = options.background()?;

    let region = calculate_bounds(items).add_padding(options.padding());

    let mut stage = build_stage(surface, host, options.include_grid());
    let fill = match medium {
        Medium::Raster => Some(background.raster_fill()),
        Medium::Vector => background.vector_fill(),
    };
    stage.add_layer(background_layer(region, fill));

    if let Some(text) = options.watermark().active_text() {
        apply_watermark(&mut stage, text, region);
    }

    stage.draw();
    Ok((stage, region))
}

fn background_layer(region: Bounds, fill: Option<Color>) -> Layer {
    let node = Node::rect("background", region.to_size(), fill)
        .with_role(NodeRole::Background)
        .with_position(region.min_point());
    Layer::new("background", LayerKind::Background).with_node(node)
}

#[cfg(test)]
mod tests {
    use limner_core::geometry::Size;

    use super::*;

    fn surface() -> Surface {
        Surface::new(Size::new(400.0, 400.0)).with_layer(
            Layer::new("content", LayerKind::Content)
                .with_node(Node::rect("box", Size::new(120.0, 120.0), None)),
        )
    }

    #[test]
    fn test_prepare_rejects_empty_items_before_staging() {
        let host = Host::new();
        let result = prepare_stage(&surface(), &[], &ExportOptions::default(), &host, Medium::Raster);

        assert!(matches!(result, Err(ExportError::NothingToExport)));
        assert_eq!(host.attached_count(), 0);
    }

    #[test]
    fn test_prepare_pads_region_and_puts_background_first() {
        let host = Host::new();
        let items = [CanvasItem::new(0.0, 0.0, 120.0, 120.0)];
        let (stage, region) = prepare_stage(
            &surface(),
            &items,
            &ExportOptions::default(),
            &host,
            Medium::Raster,
        )
        .unwrap();

        assert_eq!(region, Bounds::new(-40.0, -40.0, 200.0, 200.0));
        assert!(stage.is_drawn());

        let markup = stage.to_svg(region).unwrap().to_string();
        let background = markup.find(r#"data-layer="background""#).unwrap();
        let content = markup.find(r#"data-layer="content""#).unwrap();
        assert!(background < content);
        assert!(markup.contains(r##"fill="#ffffff""##));
    }

    #[test]
    fn test_vector_transparent_background_has_no_fill() {
        let host = Host::new();
        let items = [CanvasItem::new(0.0, 0.0, 10.0, 10.0)];
        let options = ExportOptions::new("svg").with_background("transparent");
        let (stage, region) =
            prepare_stage(&surface(), &items, &options, &host, Medium::Vector).unwrap();

        let background = &stage
            .scene()
            .layers()
            .iter()
            .find(|layer| layer.kind() == LayerKind::Background)
            .unwrap()
            .nodes()[0];
        assert!(matches!(
            background.shape(),
            limner_core::scene::Shape::Rect { fill: None, .. }
        ));
        assert!(stage.to_svg(region).is_ok());
    }

    #[test]
    fn test_payload_mime_types() {
        let markup = ExportPayload::Markup("<svg/>".to_string());
        assert_eq!(markup.mime_type(), "image/svg+xml;charset=utf-8");
        assert_eq!(markup.as_bytes(), b"<svg/>");

        let blob = ExportPayload::Binary(Blob::new(vec![1, 2, 3], "image/png"));
        assert_eq!(blob.mime_type(), "image/png");
        assert_eq!(blob.as_bytes().len(), 3);
    }
}
