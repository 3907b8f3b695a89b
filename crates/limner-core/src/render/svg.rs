//! SVG serialization of scene layers.
//!
//! Every layer becomes a `<g>` element carrying a `data-layer` attribute with
//! its [`LayerKind`](crate::scene::LayerKind) name; layers are emitted bottom
//! to top. Colors are written as `#rrggbb` plus an explicit opacity attribute
//! so that every SVG consumer, including the rasterizer, reads them the same.

use svg::{Document, node::element as svg_element};

use crate::{
    apply_stroke,
    color::Color,
    geometry::{Bounds, Point},
    scene::{Layer, Node, Shape, Transform, ordered_layers},
};

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Renders a stack of layers under a view transform into one root group.
pub fn render_scene(layers: &[Layer], transform: Transform) -> svg_element::Group {
    let mut root = svg_element::Group::new();
    if !transform.is_identity() {
        let position = transform.position();
        root = root.set(
            "transform",
            format!(
                "translate({} {}) scale({})",
                position.x(),
                position.y(),
                transform.scale()
            ),
        );
    }

    for layer in ordered_layers(layers) {
        root = root.add(render_layer(layer));
    }
    root
}

/// Renders a single layer to a group.
pub fn render_layer(layer: &Layer) -> svg_element::Group {
    layer.nodes().iter().fold(
        svg_element::Group::new()
            .set("data-layer", layer.kind().name())
            .set("data-name", layer.name()),
        |group, node| group.add(render_node(node)),
    )
}

/// Renders a node and, for groups, its subtree.
pub fn render_node(node: &Node) -> SvgNode {
    let position = node.position();
    match node.shape() {
        Shape::Group { children } => {
            let mut transform = format!("translate({} {})", position.x(), position.y());
            if node.rotation() != 0.0 {
                transform.push_str(&format!(" rotate({})", node.rotation()));
            }
            let group = children.iter().fold(
                svg_element::Group::new().set("transform", transform),
                |group, child| group.add(render_node(child)),
            );
            Box::new(with_common_attributes(group, node, None))
        }
        Shape::Rect {
            size,
            fill,
            stroke,
            corner_radius,
        } => {
            let mut rect = svg_element::Rectangle::new()
                .set("x", position.x())
                .set("y", position.y())
                .set("width", size.width())
                .set("height", size.height());
            if *corner_radius > 0.0 {
                rect = rect.set("rx", *corner_radius);
            }
            rect = apply_fill(rect, *fill);
            if let Some(stroke) = stroke {
                rect = apply_stroke!(rect, stroke);
            }
            Box::new(with_common_attributes(rect, node, Some(position)))
        }
        Shape::Ellipse { size, fill, stroke } => {
            let mut ellipse = svg_element::Ellipse::new()
                .set("cx", position.x() + size.width() / 2.0)
                .set("cy", position.y() + size.height() / 2.0)
                .set("rx", size.width() / 2.0)
                .set("ry", size.height() / 2.0);
            ellipse = apply_fill(ellipse, *fill);
            if let Some(stroke) = stroke {
                ellipse = apply_stroke!(ellipse, stroke);
            }
            Box::new(with_common_attributes(ellipse, node, Some(position)))
        }
        Shape::Line { points, stroke } => {
            let points = points
                .iter()
                .map(|p| {
                    let p = position.add_point(*p);
                    format!("{},{}", p.x(), p.y())
                })
                .collect::<Vec<_>>()
                .join(" ");
            let line = svg_element::Polyline::new()
                .set("points", points)
                .set("fill", "none");
            let line = apply_stroke!(line, stroke);
            Box::new(with_common_attributes(line, node, Some(position)))
        }
        Shape::Text {
            content,
            font_size,
            font_family,
            fill,
        } => {
            let text = svg_element::Text::new(content.as_str())
                .set("x", position.x())
                .set("y", position.y())
                .set("dominant-baseline", "hanging")
                .set("font-family", font_family.as_str())
                .set("font-size", *font_size);
            let text = apply_fill(text, Some(*fill));
            Box::new(with_common_attributes(text, node, Some(position)))
        }
    }
}

/// Smallest width or height a region document is given, in scene units.
pub const MIN_DOCUMENT_EXTENT: f32 = 1.0;

/// Wraps a rendered scene in a document whose viewport is exactly `region`.
///
/// Content outside the region is clipped by the viewport, so the document is
/// cropped to the region rather than to the full surface. A degenerate region
/// (a bare connector with no padding) keeps its origin and is widened to
/// [`MIN_DOCUMENT_EXTENT`] on the collapsed axis, since SVG consumers reject
/// a zero-sized viewport.
pub fn region_document(frame: &svg_element::Group, region: Bounds) -> Document {
    let width = region.width().max(MIN_DOCUMENT_EXTENT);
    let height = region.height().max(MIN_DOCUMENT_EXTENT);
    Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set(
            "viewBox",
            format!("{} {} {} {}", region.x(), region.y(), width, height),
        )
        .set("width", width)
        .set("height", height)
        .add(frame.clone())
}

fn apply_fill<T>(element: T, fill: Option<Color>) -> T
where
    T: svg::Node,
{
    let mut element = element;
    match fill {
        Some(color) => {
            element.assign("fill", color.to_hex());
            element.assign("fill-opacity", color.alpha());
        }
        None => element.assign("fill", "none"),
    }
    element
}

/// Applies rotation (around `pivot`) and opacity, and tags the element with
/// its role so exported markup stays inspectable.
fn with_common_attributes<T>(element: T, node: &Node, pivot: Option<Point>) -> T
where
    T: svg::Node,
{
    let mut element = element;
    element.assign("data-role", node.role().name());
    if let Some(pivot) = pivot.filter(|_| node.rotation() != 0.0) {
        element.assign(
            "transform",
            format!("rotate({} {} {})", node.rotation(), pivot.x(), pivot.y()),
        );
    }
    if node.opacity() < 1.0 {
        element.assign("opacity", node.opacity());
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometry::Size,
        scene::{LayerKind, NodeRole, StrokeDefinition},
    };

    #[test]
    fn test_render_rect_with_fill() {
        let node = Node::rect("a", Size::new(50.0, 40.0), Some(Color::new("red").unwrap()))
            .with_position(Point::new(10.0, 20.0));

        let svg = render_node(&node).to_string();

        assert!(svg.starts_with("<rect"));
        assert!(svg.contains("x=\"10\""));
        assert!(svg.contains("y=\"20\""));
        assert!(svg.contains("width=\"50\""));
        assert!(svg.contains("fill=\"#ff0000\""));
        assert!(svg.contains("data-role=\"content\""));
    }

    #[test]
    fn test_render_rect_without_fill() {
        let node = Node::rect("a", Size::new(1.0, 1.0), None);
        assert!(render_node(&node).to_string().contains("fill=\"none\""));
    }

    #[test]
    fn test_render_rotated_text_with_opacity() {
        let node = Node::text("mark", "DRAFT", 24.0)
            .with_position(Point::new(100.0, 60.0))
            .with_rotation(-30.0)
            .with_opacity(0.5)
            .with_role(NodeRole::Watermark);

        let svg = render_node(&node).to_string();

        assert!(svg.contains("DRAFT"));
        assert!(svg.contains("transform=\"rotate(-30 100 60)\""));
        assert!(svg.contains("opacity=\"0.5\""));
        assert!(svg.contains("data-role=\"watermark\""));
    }

    #[test]
    fn test_render_text_escapes_content() {
        let svg = render_node(&Node::text("t", "a < b & c", 12.0)).to_string();
        assert!(!svg.contains("a < b"));
    }

    #[test]
    fn test_render_line_points_are_offset() {
        let node = Node::new(
            "pipe",
            Shape::Line {
                points: vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)],
                stroke: StrokeDefinition::default(),
            },
        )
        .with_position(Point::new(100.0, 100.0));

        let svg = render_node(&node).to_string();

        assert!(svg.contains("points=\"100,100 110,105\""));
        assert!(svg.contains("stroke=\"#000000\""));
    }

    #[test]
    fn test_render_group_translates_children() {
        let node = Node::group("g", vec![Node::rect("c", Size::new(1.0, 1.0), None)])
            .with_position(Point::new(5.0, 7.0));

        let svg = render_node(&node).to_string();

        assert!(svg.starts_with("<g"));
        assert!(svg.contains("translate(5 7)"));
        assert!(svg.contains("<rect"));
    }

    #[test]
    fn test_render_scene_orders_layers() {
        let layers = vec![
            Layer::new("top", LayerKind::Watermark),
            Layer::new("bottom", LayerKind::Background),
        ];

        let svg = render_scene(&layers, Transform::identity()).to_string();

        let bottom = svg.find("data-layer=\"background\"").expect("background layer");
        let top = svg.find("data-layer=\"watermark\"").expect("watermark layer");
        assert!(bottom < top);
        assert!(!svg.contains("transform"));
    }

    #[test]
    fn test_render_scene_applies_view_transform() {
        let svg = render_scene(&[], Transform::new(2.0, Point::new(10.0, 0.0))).to_string();
        assert!(svg.contains("translate(10 0) scale(2)"));
    }

    #[test]
    fn test_region_document_viewbox() {
        let doc = region_document(
            &svg_element::Group::new(),
            Bounds::new(-40.0, -40.0, 200.0, 200.0),
        )
        .to_string();

        assert!(doc.contains("viewBox=\"-40 -40 200 200\""));
        assert!(doc.contains("width=\"200\""));
        assert!(doc.contains("height=\"200\""));
    }

    #[test]
    fn test_region_document_widens_collapsed_axis() {
        let doc = region_document(
            &svg_element::Group::new(),
            Bounds::new(5.0, 5.0, 10.0, 0.0),
        )
        .to_string();

        assert!(doc.contains("viewBox=\"5 5 10 1\""));
        assert!(doc.contains("width=\"10\""));
        assert!(doc.contains("height=\"1\""));
    }
}
