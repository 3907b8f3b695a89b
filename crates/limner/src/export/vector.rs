//! SVG exports.

use log::info;

use limner_core::scene::{CanvasItem, Host, Surface};

use super::{Medium, prepare_stage};
use crate::{ExportError, options::ExportOptions};

/// Serializes the padded item region as SVG markup.
///
/// Scale and quality do not apply to vector output.
pub(crate) fn render_vector(
    surface: &Surface,
    items: &[CanvasItem],
    options: &ExportOptions,
    host: &Host,
) -> Result<String, ExportError> {
    let (stage, region) = prepare_stage(surface, items, options, host, Medium::Vector)?;
    let markup = stage.to_svg(region)?.to_string();
    stage.destroy();

    info!(bytes = markup.len(); "Vector export finished");
    Ok(markup)
}
