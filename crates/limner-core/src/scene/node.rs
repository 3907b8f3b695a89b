//! Scene nodes and the roles that tag them.

use serde::Deserialize;

use crate::{
    color::Color,
    geometry::{Bounds, Point, Size},
    scene::StrokeDefinition,
};

/// What a node is for, assigned when the node is created.
///
/// Editor chrome (selection boxes, resize grips, hover highlights, alignment
/// guides and snap lines) lives in the same tree as the diagram content; the
/// role is what lets an export tell them apart without inspecting names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    /// Diagram content.
    #[default]
    Content,
    /// Background grid of the editing surface.
    Grid,
    /// Selection indicators.
    Selection,
    /// Resize and drag grips.
    Handle,
    /// Hover highlights.
    Hover,
    /// Alignment guides.
    Guide,
    /// Helper and snap lines.
    Helper,
    /// Export background fill.
    Background,
    /// Export watermark overlay.
    Watermark,
}

impl NodeRole {
    /// Returns `true` for roles that only make sense inside the editor.
    pub fn is_decoration(self) -> bool {
        matches!(
            self,
            Self::Selection | Self::Handle | Self::Hover | Self::Guide | Self::Helper
        )
    }

    /// Returns a human-readable name for this role.
    pub fn name(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Grid => "grid",
            Self::Selection => "selection",
            Self::Handle => "handle",
            Self::Hover => "hover",
            Self::Guide => "guide",
            Self::Helper => "helper",
            Self::Background => "background",
            Self::Watermark => "watermark",
        }
    }
}

fn default_font_size() -> f32 {
    14.0
}

fn default_font_family() -> String {
    "sans-serif".to_string()
}

/// Geometry and paint of a node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    /// A container; children are positioned relative to the group's position.
    Group {
        #[serde(default)]
        children: Vec<Node>,
    },
    Rect {
        size: Size,
        #[serde(default)]
        fill: Option<Color>,
        #[serde(default)]
        stroke: Option<StrokeDefinition>,
        #[serde(default)]
        corner_radius: f32,
    },
    Ellipse {
        size: Size,
        #[serde(default)]
        fill: Option<Color>,
        #[serde(default)]
        stroke: Option<StrokeDefinition>,
    },
    /// An open polyline; points are relative to the node position.
    Line {
        points: Vec<Point>,
        #[serde(default)]
        stroke: StrokeDefinition,
    },
    Text {
        content: String,
        #[serde(default = "default_font_size")]
        font_size: f32,
        #[serde(default = "default_font_family")]
        font_family: String,
        #[serde(default)]
        fill: Color,
    },
}

fn default_exportable() -> bool {
    true
}

fn default_opacity() -> f32 {
    1.0
}

/// A node of the scene graph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    #[serde(default)]
    name: String,
    #[serde(default)]
    role: NodeRole,
    #[serde(default = "default_exportable")]
    exportable: bool,
    #[serde(default)]
    position: Point,
    /// Rotation in degrees around the node position.
    #[serde(default)]
    rotation: f32,
    #[serde(default = "default_opacity")]
    opacity: f32,
    #[serde(flatten)]
    shape: Shape,
}

impl Node {
    /// Creates an exportable content node at the origin.
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            role: NodeRole::Content,
            exportable: true,
            position: Point::default(),
            rotation: 0.0,
            opacity: default_opacity(),
            shape,
        }
    }

    /// Creates a rectangle node with the given fill.
    pub fn rect(name: impl Into<String>, size: Size, fill: Option<Color>) -> Self {
        Self::new(
            name,
            Shape::Rect {
                size,
                fill,
                stroke: None,
                corner_radius: 0.0,
            },
        )
    }

    /// Creates a text node.
    pub fn text(name: impl Into<String>, content: impl Into<String>, font_size: f32) -> Self {
        Self::new(
            name,
            Shape::Text {
                content: content.into(),
                font_size,
                font_family: default_font_family(),
                fill: Color::default(),
            },
        )
    }

    /// Creates a group node holding `children`.
    pub fn group(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(name, Shape::Group { children })
    }

    pub fn with_role(mut self, role: NodeRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Marks the node as excluded from (or included in) exports.
    pub fn with_exportable(mut self, exportable: bool) -> Self {
        self.exportable = exportable;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> NodeRole {
        self.role
    }

    pub fn is_exportable(&self) -> bool {
        self.exportable
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the children of a group node, or an empty slice.
    pub fn children(&self) -> &[Node] {
        match &self.shape {
            Shape::Group { children } => children,
            _ => &[],
        }
    }

    /// Destroys every descendant for which `keep` returns `false`, together
    /// with its whole subtree. Returns the number of nodes removed, counting
    /// each removed subtree root once.
    pub fn retain_descendants<F>(&mut self, keep: &F) -> usize
    where
        F: Fn(&Node) -> bool,
    {
        let Shape::Group { children } = &mut self.shape else {
            return 0;
        };
        retain_nodes(children, keep)
    }

    /// Unrotated extent of the node in the coordinate space of its parent.
    ///
    /// Text has no measured extent and reports `None`, as does an empty group.
    pub fn local_bounds(&self) -> Option<Bounds> {
        let origin = self.position;
        match &self.shape {
            Shape::Rect { size, .. } | Shape::Ellipse { size, .. } => {
                Some(Bounds::new_from_top_left(origin, *size))
            }
            Shape::Line { points, .. } => points
                .iter()
                .map(|p| Bounds::new_from_top_left(origin.add_point(*p), Size::default()))
                .reduce(|acc, b| acc.merge(&b)),
            Shape::Text { .. } => None,
            Shape::Group { children } => children
                .iter()
                .filter_map(Node::local_bounds)
                .reduce(|acc, b| acc.merge(&b))
                .map(|b| b.translate(origin)),
        }
    }
}

/// Removes every node rejected by `keep` from `nodes`, recursing into the
/// groups that survive.
pub(crate) fn retain_nodes<F>(nodes: &mut Vec<Node>, keep: &F) -> usize
where
    F: Fn(&Node) -> bool,
{
    let before = nodes.len();
    nodes.retain(|node| keep(node));
    let mut removed = before - nodes.len();
    for node in nodes.iter_mut() {
        removed += node.retain_descendants(keep);
    }
    removed
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_role_is_decoration() {
        for role in [
            NodeRole::Selection,
            NodeRole::Handle,
            NodeRole::Hover,
            NodeRole::Guide,
            NodeRole::Helper,
        ] {
            assert!(role.is_decoration(), "{} should be a decoration", role.name());
        }
        for role in [
            NodeRole::Content,
            NodeRole::Grid,
            NodeRole::Background,
            NodeRole::Watermark,
        ] {
            assert!(!role.is_decoration(), "{} should not be a decoration", role.name());
        }
    }

    #[test]
    fn test_node_builders() {
        let node = Node::rect("box", Size::new(10.0, 20.0), None)
            .with_role(NodeRole::Hover)
            .with_position(Point::new(5.0, 6.0))
            .with_rotation(15.0)
            .with_opacity(0.5)
            .with_exportable(false);

        assert_eq!(node.name(), "box");
        assert_eq!(node.role(), NodeRole::Hover);
        assert!(!node.is_exportable());
        assert_eq!(node.position(), Point::new(5.0, 6.0));
        assert_approx_eq!(f32, node.rotation(), 15.0);
        assert_approx_eq!(f32, node.opacity(), 0.5);
    }

    #[test]
    fn test_retain_descendants_recurses_into_groups() {
        let inner = Node::group(
            "inner",
            vec![
                Node::rect("keep", Size::new(1.0, 1.0), None),
                Node::rect("grip", Size::new(1.0, 1.0), None).with_role(NodeRole::Handle),
            ],
        );
        let mut root = Node::group(
            "root",
            vec![
                inner,
                Node::rect("halo", Size::new(1.0, 1.0), None).with_role(NodeRole::Selection),
            ],
        );

        let removed = root.retain_descendants(&|n: &Node| !n.role().is_decoration());

        assert_eq!(removed, 2);
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].children().len(), 1);
        assert_eq!(root.children()[0].children()[0].name(), "keep");
    }

    #[test]
    fn test_retain_descendants_on_leaf_is_noop() {
        let mut leaf = Node::text("label", "hi", 12.0);
        assert_eq!(leaf.retain_descendants(&|_: &Node| false), 0);
    }

    #[test]
    fn test_local_bounds_group_translates_children() {
        let group = Node::group(
            "g",
            vec![
                Node::rect("a", Size::new(10.0, 10.0), None),
                Node::rect("b", Size::new(10.0, 10.0), None).with_position(Point::new(20.0, 5.0)),
            ],
        )
        .with_position(Point::new(100.0, 100.0));

        let bounds = group.local_bounds().expect("group has children with extent");
        assert_eq!(bounds, Bounds::new(100.0, 100.0, 30.0, 15.0));
    }

    #[test]
    fn test_local_bounds_text_is_none() {
        assert!(Node::text("t", "label", 10.0).local_bounds().is_none());
    }

    #[test]
    fn test_node_deserialize() {
        let node: Node = toml::from_str(
            r#"
            name = "tank"
            shape = "rect"
            position = { x = 10.0, y = 20.0 }
            size = { width = 50.0, height = 30.0 }
            fill = "steelblue"
            "#,
        )
        .expect("valid node");

        assert_eq!(node.role(), NodeRole::Content);
        assert!(node.is_exportable());
        assert_eq!(node.local_bounds(), Some(Bounds::new(10.0, 20.0, 50.0, 30.0)));
    }
}
