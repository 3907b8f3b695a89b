//! Scene files.
//!
//! A scene file is TOML holding a `[surface]` table, laid out like
//! [`Surface`], and an optional `[[items]]` array. Without items the export
//! region is derived from the surface's content nodes.
//!
//! ```toml
//! [surface]
//! size = { width = 400.0, height = 300.0 }
//!
//! [[surface.layers]]
//! name = "content"
//! kind = "content"
//!
//! [[surface.layers.nodes]]
//! name = "tank"
//! shape = "rect"
//! size = { width = 100.0, height = 50.0 }
//! fill = "#3366cc"
//! ```

use std::{fs, path::Path};

use log::debug;
use serde::Deserialize;

use limner::scene::{CanvasItem, Surface};

use crate::CliError;

/// A surface plus the items that decide the export region.
#[derive(Debug, Deserialize)]
pub struct SceneFile {
    surface: Surface,
    #[serde(default)]
    items: Vec<CanvasItem>,
}

impl SceneFile {
    /// Reads and parses a scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let path = path.as_ref();
        let src = fs::read_to_string(path)?;
        Self::parse(src, &path.display().to_string())
    }

    /// Parses scene source; `path` is only used for error reporting.
    pub fn parse(src: String, path: &str) -> Result<Self, CliError> {
        match toml::from_str::<Self>(&src) {
            Ok(scene) => {
                debug!(
                    path = path,
                    layers = scene.surface.layers().len(),
                    nodes = scene.surface.node_count();
                    "Scene file loaded"
                );
                Ok(scene)
            }
            Err(err) => Err(CliError::Scene {
                path: path.to_string(),
                message: err.message().to_string(),
                span: err.span(),
                src,
            }),
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The listed items, or the surface's content items if none are listed.
    pub fn items(&self) -> Vec<CanvasItem> {
        if self.items.is_empty() {
            self.surface.content_items()
        } else {
            self.items.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r##"
        [surface]
        size = { width = 400.0, height = 300.0 }

        [[surface.layers]]
        name = "content"
        kind = "content"

        [[surface.layers.nodes]]
        name = "tank"
        shape = "rect"
        size = { width = 100.0, height = 50.0 }
        fill = "#3366cc"

        [[surface.layers.nodes]]
        name = "pump"
        shape = "ellipse"
        position = { x = 20.0, y = 80.0 }
        size = { width = 100.0, height = 40.0 }
    "##;

    #[test]
    fn test_items_fall_back_to_content_nodes() {
        let scene = SceneFile::parse(SCENE.to_string(), "plant.toml").unwrap();
        let items = scene.items();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id(), Some("tank"));
        assert_eq!(items[1].x(), 20.0);
    }

    #[test]
    fn test_listed_items_take_precedence() {
        let src = format!("{SCENE}\n[[items]]\nx = 0.0\ny = 0.0\nwidth = 10.0\nheight = 10.0\n");
        let scene = SceneFile::parse(src, "plant.toml").unwrap();

        assert_eq!(scene.items().len(), 1);
        assert_eq!(scene.items()[0].width(), 10.0);
    }

    #[test]
    fn test_parse_error_keeps_source_and_span() {
        let src = "[surface\nsize = 12\n".to_string();
        match SceneFile::parse(src.clone(), "broken.toml") {
            Err(CliError::Scene {
                path,
                src: kept,
                span,
                ..
            }) => {
                assert_eq!(path, "broken.toml");
                assert_eq!(kept, src);
                assert!(span.is_some());
            }
            other => panic!("expected scene error, got {other:?}"),
        }
    }
}
