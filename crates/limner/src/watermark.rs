//! Watermark overlay.

use log::debug;

use limner_core::{
    color::Color,
    geometry::{Bounds, Point},
    scene::{Layer, LayerKind, Node, NodeRole, Shape},
};

use crate::stage::ExportStage;

/// Distance of the text anchor from the right edge of the region.
pub const OFFSET_X: f32 = 200.0;
/// Distance of the text anchor from the bottom edge of the region.
pub const OFFSET_Y: f32 = 40.0;
pub const ROTATION: f32 = -30.0;
pub const FONT_SIZE: f32 = 24.0;
pub const FILL_ALPHA: f32 = 0.15;
pub const OPACITY: f32 = 0.5;

/// Stamps `text` near the bottom-right corner of `region`, on a new topmost
/// layer of the stage.
///
/// Every call adds another layer; callers decide whether a stage is stamped.
pub fn apply_watermark(stage: &mut ExportStage<'_>, text: &str, region: Bounds) {
    let anchor = Point::new(region.max_x() - OFFSET_X, region.max_y() - OFFSET_Y);
    let node = Node::new(
        "watermark",
        Shape::Text {
            content: text.to_string(),
            font_size: FONT_SIZE,
            font_family: "sans-serif".to_string(),
            fill: Color::default().with_alpha(FILL_ALPHA),
        },
    )
    .with_role(NodeRole::Watermark)
    .with_position(anchor)
    .with_rotation(ROTATION)
    .with_opacity(OPACITY);

    debug!(x = anchor.x(), y = anchor.y(); "Applying watermark");
    stage.add_layer(Layer::new("watermark", LayerKind::Watermark).with_node(node));
}
