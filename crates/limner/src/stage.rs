//! Isolated, decoration-free copies of a live surface.
//!
//! An [`ExportStage`] is what an export actually draws: a deep clone of the
//! editor surface with every editor-only node destroyed and the view transform
//! reset, living inside its own off-screen container. The live surface is only
//! ever read.

use log::{debug, trace};
use svg::{Document, node::element::Group};

use limner_core::{
    geometry::Bounds,
    render::{Raster, Rasterizer, svg as svg_render},
    scene::{ContainerId, Host, Layer, Node, NodeRole, Surface, TemporaryContainer, Transform},
};

use crate::ExportError;

/// A pruned clone of a surface, attached off-screen for the duration of one
/// export.
///
/// Dropping the stage releases its container.
#[derive(Debug)]
pub struct ExportStage<'h> {
    scene: Surface,
    frame: Option<Group>,
    container: TemporaryContainer<'h>,
}

/// Builds an export stage from the live `surface`.
///
/// Decoration nodes (selection, handles, hover, guides, helpers) and
/// non-exportable nodes are removed at any depth. Grid nodes survive only when
/// `include_grid` is set. The stage transform is the identity, so stage
/// coordinates are scene coordinates.
pub fn build_stage<'h>(surface: &Surface, host: &'h Host, include_grid: bool) -> ExportStage<'h> {
    let container = host.attach_offscreen(surface.size());

    let mut scene = surface.clone();
    let keep = |node: &Node| keep_for_export(node, include_grid);
    let removed: usize = scene
        .layers_mut()
        .iter_mut()
        .map(|layer| layer.retain_nodes(&keep))
        .sum();
    scene.set_transform(Transform::identity());

    debug!(
        container:% = container.id(),
        removed = removed,
        include_grid = include_grid;
        "Built export stage"
    );

    ExportStage {
        scene,
        frame: None,
        container,
    }
}

fn keep_for_export(node: &Node, include_grid: bool) -> bool {
    if !node.is_exportable() || node.role().is_decoration() {
        return false;
    }
    include_grid || node.role() != NodeRole::Grid
}

impl ExportStage<'_> {
    /// Adds a layer. Placement follows the layer kind, not insertion order.
    ///
    /// Any earlier [`draw`](Self::draw) is invalidated.
    pub fn add_layer(&mut self, layer: Layer) {
        trace!(layer = layer.name(), kind = layer.kind().name(); "Adding stage layer");
        self.scene.add_layer(layer);
        self.frame = None;
    }

    /// Renders the current scene synchronously.
    ///
    /// Extraction reads the frame produced here, never a stale one.
    pub fn draw(&mut self) {
        self.frame = Some(svg_render::render_scene(
            self.scene.layers(),
            self.scene.transform(),
        ));
    }

    pub fn is_drawn(&self) -> bool {
        self.frame.is_some()
    }

    /// The pruned scene.
    pub fn scene(&self) -> &Surface {
        &self.scene
    }

    pub fn container_id(&self) -> ContainerId {
        self.container.id()
    }

    /// Extracts `region` of the drawn frame as an SVG document.
    pub fn to_svg(&self, region: Bounds) -> Result<Document, ExportError> {
        let frame = self.frame.as_ref().ok_or(ExportError::StageNotDrawn)?;
        Ok(svg_render::region_document(frame, region))
    }

    /// Extracts `region` of the drawn frame as pixels, `pixel_ratio` device
    /// pixels per scene unit.
    pub fn to_raster(
        &self,
        region: Bounds,
        pixel_ratio: f32,
        rasterizer: &Rasterizer,
    ) -> Result<Raster, ExportError> {
        let markup = self.to_svg(region)?.to_string();
        Ok(rasterizer.rasterize(&markup, pixel_ratio)?)
    }

    /// Destroys the stage and detaches its container.
    pub fn destroy(self) {}
}

#[cfg(test)]
mod tests {
    use limner_core::{
        geometry::{Point, Size},
        scene::LayerKind,
    };

    use super::*;

    fn editor_surface() -> Surface {
        Surface::new(Size::new(640.0, 480.0))
            .with_transform(Transform::new(1.5, Point::new(-20.0, 35.0)))
            .with_layer(
                Layer::new("grid", LayerKind::Grid).with_node(
                    Node::rect("grid-line", Size::new(640.0, 1.0), None).with_role(NodeRole::Grid),
                ),
            )
            .with_layer(
                Layer::new("content", LayerKind::Content)
                    .with_node(Node::rect("pump", Size::new(40.0, 40.0), None))
                    .with_node(Node::group(
                        "unit",
                        vec![
                            Node::rect("tank", Size::new(20.0, 60.0), None),
                            Node::rect("tank-handle", Size::new(6.0, 6.0), None)
                                .with_role(NodeRole::Handle),
                            Node::group(
                                "nested",
                                vec![
                                    Node::rect("guide", Size::new(1.0, 100.0), None)
                                        .with_role(NodeRole::Guide),
                                ],
                            ),
                        ],
                    ))
                    .with_node(
                        Node::rect("scratch", Size::new(5.0, 5.0), None).with_exportable(false),
                    ),
            )
            .with_layer(
                Layer::new("overlay", LayerKind::Overlay)
                    .with_node(
                        Node::rect("selection", Size::new(44.0, 44.0), None)
                            .with_role(NodeRole::Selection),
                    )
                    .with_node(
                        Node::rect("hover", Size::new(44.0, 44.0), None).with_role(NodeRole::Hover),
                    )
                    .with_node(
                        Node::rect("helper", Size::new(2.0, 2.0), None).with_role(NodeRole::Helper),
                    ),
            )
    }

    fn names(surface: &Surface) -> Vec<String> {
        fn walk(nodes: &[Node], out: &mut Vec<String>) {
            for node in nodes {
                out.push(node.name().to_string());
                walk(node.children(), out);
            }
        }
        let mut out = Vec::new();
        for layer in surface.layers() {
            walk(layer.nodes(), &mut out);
        }
        out
    }

    #[test]
    fn test_stage_prunes_decorations_at_any_depth() {
        let host = Host::new();
        let surface = editor_surface();
        let stage = build_stage(&surface, &host, false);

        assert_eq!(names(stage.scene()), vec!["pump", "unit", "tank", "nested"]);
    }

    #[test]
    fn test_stage_keeps_grid_when_requested() {
        let host = Host::new();
        let stage = build_stage(&editor_surface(), &host, true);

        assert!(names(stage.scene()).contains(&"grid-line".to_string()));
    }

    #[test]
    fn test_stage_resets_transform_and_leaves_surface_alone() {
        let host = Host::new();
        let surface = editor_surface();
        let snapshot = surface.clone();

        let stage = build_stage(&surface, &host, false);
        assert!(stage.scene().transform().is_identity());
        assert_eq!(surface, snapshot);
    }

    #[test]
    fn test_stage_owns_an_offscreen_container() {
        let host = Host::new();
        let stage = build_stage(&editor_surface(), &host, false);
        let id = stage.container_id();

        let bounds = host.container_bounds(id).expect("container is attached");
        assert!(bounds.x() <= -10_000.0);
        assert!(bounds.y() <= -10_000.0);

        stage.destroy();
        assert!(!host.is_attached(id));
        assert_eq!(host.attached_count(), 0);
    }

    #[test]
    fn test_extraction_requires_draw() {
        let host = Host::new();
        let mut stage = build_stage(&editor_surface(), &host, false);
        let region = Bounds::new(0.0, 0.0, 100.0, 100.0);

        assert!(matches!(stage.to_svg(region), Err(ExportError::StageNotDrawn)));

        stage.draw();
        assert!(stage.is_drawn());
        assert!(stage.to_svg(region).is_ok());

        stage.add_layer(Layer::new("late", LayerKind::Overlay));
        assert!(!stage.is_drawn());
    }

    #[test]
    fn test_extracted_svg_covers_region() {
        let host = Host::new();
        let mut stage = build_stage(&editor_surface(), &host, false);
        stage.draw();

        let markup = stage
            .to_svg(Bounds::new(-40.0, -40.0, 200.0, 200.0))
            .unwrap()
            .to_string();
        assert!(markup.contains(r#"viewBox="-40 -40 200 200""#));
        assert!(!markup.contains("selection"));
    }
}
