//! Diagram items as seen by the export pipeline.

use serde::Deserialize;

use crate::geometry::{Bounds, Point, Size};

/// A positioned, sized diagram element in scene coordinates.
///
/// Items are read-only input to an export: they decide the exported region,
/// while the surface decides what is drawn inside it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CanvasItem {
    #[serde(default)]
    id: Option<String>,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl CanvasItem {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id: None,
            x,
            y,
            width,
            height,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the rectangle covered by this item.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(Point::new(self.x, self.y), Size::new(self.width, self.height))
    }
}

impl From<Bounds> for CanvasItem {
    fn from(bounds: Bounds) -> Self {
        Self::new(bounds.x(), bounds.y(), bounds.width(), bounds.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_bounds() {
        let item = CanvasItem::new(100.0, 100.0, 20.0, 20.0).with_id("valve");
        assert_eq!(item.id(), Some("valve"));
        assert_eq!(item.bounds(), Bounds::new(100.0, 100.0, 20.0, 20.0));
    }

    #[test]
    fn test_item_from_bounds() {
        let item = CanvasItem::from(Bounds::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(item.x(), 1.0);
        assert_eq!(item.y(), 2.0);
        assert_eq!(item.width(), 3.0);
        assert_eq!(item.height(), 4.0);
        assert_eq!(item.id(), None);
    }
}
