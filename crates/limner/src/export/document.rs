//! PDF exports.
//!
//! The document is a single page holding the PNG export of the diagram,
//! rendered at twice the requested scale. The page is as large as the image
//! at 72 dpi, so one pixel maps to one point.

use log::{debug, info};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, XObjectId,
    image::RawImage,
    xobject::{XObject, XObjectTransform},
};

use limner_core::{
    render::Rasterizer,
    scene::{CanvasItem, Host, Surface},
};

use super::{Blob, render_raster};
use crate::{
    ExportError,
    options::{ExportFormat, ExportOptions},
};

/// Pixel ratio multiplier applied on top of the requested scale.
pub const DOCUMENT_SCALE_FACTOR: f32 = 2.0;

const DPI: f32 = 72.0;
const MM_PER_PT: f32 = 25.4 / DPI;

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Landscape iff strictly wider than tall.
    pub fn for_size(width: f32, height: f32) -> Self {
        if width > height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

/// Size of the document page in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    width: f32,
    height: f32,
    orientation: Orientation,
}

impl PageGeometry {
    fn from_pixels(width: usize, height: usize) -> Self {
        let (width, height) = (width as f32, height as f32);
        Self {
            width,
            height,
            orientation: Orientation::for_size(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

/// A rendered PDF together with its page geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentExport {
    blob: Blob,
    page: PageGeometry,
}

impl DocumentExport {
    pub fn blob(&self) -> &Blob {
        &self.blob
    }

    pub fn into_blob(self) -> Blob {
        self.blob
    }

    pub fn page(&self) -> PageGeometry {
        self.page
    }
}

pub(crate) fn render_document(
    surface: &Surface,
    items: &[CanvasItem],
    options: &ExportOptions,
    host: &Host,
    rasterizer: &Rasterizer,
) -> Result<DocumentExport, ExportError> {
    let png = render_raster(
        surface,
        items,
        options,
        host,
        rasterizer,
        ExportFormat::Png,
        options.scale() * DOCUMENT_SCALE_FACTOR,
    )?;

    let mut warnings = Vec::new();
    let image = decode_image(png.bytes(), &mut warnings)?;
    let page = PageGeometry::from_pixels(image.width, image.height);
    debug!(
        width = page.width(),
        height = page.height(),
        orientation:? = page.orientation();
        "Laying out document page"
    );

    let mut doc = PdfDocument::new("Diagram export");
    let image_id = XObjectId::new();
    doc.resources
        .xobjects
        .map
        .insert(image_id.clone(), XObject::Image(image));

    let transform = XObjectTransform {
        translate_x: Some(Pt(0.0)),
        translate_y: Some(Pt(0.0)),
        scale_x: None,
        scale_y: None,
        rotate: None,
        dpi: Some(DPI),
    };
    let ops = vec![Op::UseXobject {
        id: image_id,
        transform,
    }];
    doc.pages.push(PdfPage::new(
        Mm(page.width() * MM_PER_PT),
        Mm(page.height() * MM_PER_PT),
        ops,
    ));

    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    info!(bytes = bytes.len(), pages = doc.pages.len(); "Document export finished");

    Ok(DocumentExport {
        blob: Blob::new(bytes, ExportFormat::Pdf.mime_type()),
        page,
    })
}

fn decode_image(bytes: &[u8], warnings: &mut Vec<PdfWarnMsg>) -> Result<RawImage, ExportError> {
    RawImage::decode_from_bytes(bytes, warnings).map_err(ExportError::ImageDecode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation() {
        assert_eq!(Orientation::for_size(400.0, 300.0), Orientation::Landscape);
        assert_eq!(Orientation::for_size(300.0, 400.0), Orientation::Portrait);
        assert_eq!(Orientation::for_size(300.0, 300.0), Orientation::Portrait);
    }

    #[test]
    fn test_page_geometry_uses_one_point_per_pixel() {
        let page = PageGeometry::from_pixels(800, 400);
        assert_eq!(page.width(), 800.0);
        assert_eq!(page.height(), 400.0);
        assert_eq!(page.orientation(), Orientation::Landscape);
    }

    #[test]
    fn test_decode_image_rejects_non_image_bytes() {
        let mut warnings = Vec::new();
        let result = decode_image(b"not an image", &mut warnings);
        assert!(matches!(result, Err(ExportError::ImageDecode(_))));
    }

    #[test]
    fn test_decode_image_reads_png_dimensions() {
        let png = Rasterizer::new()
            .rasterize(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="3" height="2"/>"#,
                1.0,
            )
            .unwrap()
            .encode_png()
            .unwrap();

        let mut warnings = Vec::new();
        let image = decode_image(&png, &mut warnings).unwrap();
        assert_eq!((image.width, image.height), (3, 2));
    }
}
