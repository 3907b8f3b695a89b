//! The live rendering surface of a diagram editor.

use serde::Deserialize;

use crate::{
    geometry::{Point, Size},
    scene::{CanvasItem, Layer, NodeRole},
};

fn default_scale() -> f32 {
    1.0
}

/// View transform of a surface (zoom and pan).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Transform {
    #[serde(default = "default_scale")]
    scale: f32,
    #[serde(default)]
    position: Point,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn new(scale: f32, position: Point) -> Self {
        Self { scale, position }
    }

    /// Scale 1 at position (0, 0): scene coordinates map to themselves.
    pub fn identity() -> Self {
        Self::new(1.0, Point::default())
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.position.is_zero()
    }
}

/// A stack of layers plus the view transform the editor currently applies.
///
/// `Clone` is a deep clone: the export pipeline relies on it to obtain a copy
/// it may mutate freely.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Surface {
    size: Size,
    #[serde(default)]
    transform: Transform,
    #[serde(default)]
    layers: Vec<Layer>,
}

impl Surface {
    /// Creates an empty surface with the given viewport size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            transform: Transform::identity(),
            layers: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.add_layer(layer);
        self
    }

    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Returns the number of nodes at any depth across all layers.
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[crate::scene::Node]) -> usize {
            nodes.iter().map(|n| 1 + count(n.children())).sum()
        }
        self.layers.iter().map(|layer| count(layer.nodes())).sum()
    }

    /// Derives diagram items from the top-level exportable content nodes.
    ///
    /// Nodes without a measurable extent (text, empty groups) are skipped.
    pub fn content_items(&self) -> Vec<CanvasItem> {
        self.layers
            .iter()
            .flat_map(|layer| layer.nodes())
            .filter(|node| node.role() == NodeRole::Content && node.is_exportable())
            .filter_map(|node| {
                let item = CanvasItem::from(node.local_bounds()?);
                Some(if node.name().is_empty() {
                    item
                } else {
                    item.with_id(node.name())
                })
            })
            .collect()
    }
}
