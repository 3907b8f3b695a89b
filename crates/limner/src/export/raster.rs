//! PNG and JPEG exports.

use image::{ExtendedColorType, codecs::jpeg::JpegEncoder};
use log::{debug, info};

use limner_core::{
    render::{Raster, Rasterizer},
    scene::{CanvasItem, Host, Surface},
};

use super::{Blob, Medium, prepare_stage};
use crate::{
    ExportError,
    options::{ExportFormat, ExportOptions, Quality},
};

/// Rasterizes the padded item region at `pixel_ratio` and encodes it.
///
/// `format` selects JPEG; anything else is encoded as PNG. PNG encoding
/// ignores `quality`. A transparent background is painted white.
pub(crate) fn render_raster(
    surface: &Surface,
    items: &[CanvasItem],
    options: &ExportOptions,
    host: &Host,
    rasterizer: &Rasterizer,
    format: ExportFormat,
    pixel_ratio: f32,
) -> Result<Blob, ExportError> {
    let (stage, region) = prepare_stage(surface, items, options, host, Medium::Raster)?;
    let raster = stage.to_raster(region, pixel_ratio, rasterizer)?;
    stage.destroy();
    debug!(width = raster.width(), height = raster.height(); "Extracted raster region");

    let (bytes, format) = match format {
        ExportFormat::Jpeg => (encode_jpeg(&raster, options.quality())?, ExportFormat::Jpeg),
        _ => (raster.encode_png()?, ExportFormat::Png),
    };

    info!(format = format.name(), bytes = bytes.len(); "Raster export finished");
    Ok(Blob::new(bytes, format.mime_type()))
}

fn encode_jpeg(raster: &Raster, quality: Quality) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality.jpeg_quality())
        .encode(
            &raster.to_rgb8(),
            raster.width(),
            raster.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|err| ExportError::Encode(err.to_string()))?;
    Ok(bytes)
}
