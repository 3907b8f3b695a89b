//! Z-ordered layers of a scene.
//!
//! A surface is a stack of [`Layer`]s. Each layer has a [`LayerKind`] that
//! fixes its place in the stack, so the export pipeline can add a background
//! "at the bottom" or a watermark "on top" by kind alone, without caring how
//! the editor happened to order its own layers.
//!
//! # Example
//!
//! ```
//! # use limner_core::scene::{Layer, LayerKind, Node};
//! # use limner_core::geometry::Size;
//! let mut stack = vec![
//!     Layer::new("shapes", LayerKind::Content),
//!     Layer::new("paper", LayerKind::Background),
//! ];
//! stack[0].add(Node::rect("box", Size::new(10.0, 10.0), None));
//!
//! let ordered = limner_core::scene::ordered_layers(&stack);
//! assert_eq!(ordered[0].kind(), LayerKind::Background);
//! ```

use serde::Deserialize;

use crate::scene::{Node, node::retain_nodes};

/// Defines the stacking order of layers.
///
/// Layers are rendered from bottom to top in the order defined by variant
/// declaration. The `Ord` derive uses declaration order, so the first variant
/// renders first (bottom) and the last variant renders last (top).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Background fills - renders first
    Background,
    /// The editor grid
    Grid,
    /// Diagram content - default layer
    #[default]
    Content,
    /// Editor overlays such as selection and guides
    Overlay,
    /// Export watermark - renders last
    Watermark,
}

impl LayerKind {
    /// Returns a human-readable name for this layer kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Grid => "grid",
            Self::Content => "content",
            Self::Overlay => "overlay",
            Self::Watermark => "watermark",
        }
    }
}

/// A named list of nodes at one position of the stack.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Layer {
    name: String,
    #[serde(default)]
    kind: LayerKind,
    #[serde(default)]
    nodes: Vec<Node>,
}

impl Layer {
    /// Creates a new empty layer.
    pub fn new(name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            nodes: Vec::new(),
        }
    }

    /// Appends a node on top of the existing nodes of this layer.
    pub fn add(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Builder-style variant of [`Layer::add`].
    pub fn with_node(mut self, node: Node) -> Self {
        self.add(node);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns `true` if the layer holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Destroys every node (at any depth) for which `keep` returns `false`.
    ///
    /// Returns the number of removed subtrees.
    pub fn retain_nodes<F>(&mut self, keep: &F) -> usize
    where
        F: Fn(&Node) -> bool,
    {
        retain_nodes(&mut self.nodes, keep)
    }
}

/// Returns the layers sorted bottom to top by kind.
///
/// Sorting is stable: layers of the same kind keep their relative order.
pub fn ordered_layers(layers: &[Layer]) -> Vec<&Layer> {
    let mut ordered: Vec<&Layer> = layers.iter().collect();
    ordered.sort_by_key(|layer| layer.kind());
    ordered
}
