//! Bounding box of the diagram items.

use limner_core::{geometry::Bounds, scene::CanvasItem};

/// Bounds reported for an empty item set.
pub const PLACEHOLDER_BOUNDS: Bounds = Bounds::new(0.0, 0.0, 100.0, 100.0);

/// Computes the axis-aligned box enclosing every item.
///
/// An empty slice yields [`PLACEHOLDER_BOUNDS`] so callers never see
/// infinite or NaN extents.
///
/// # Examples
///
/// ```
/// use limner::calculate_bounds;
/// use limner_core::scene::CanvasItem;
///
/// let bounds = calculate_bounds(&[
///     CanvasItem::new(0.0, 0.0, 100.0, 50.0),
///     CanvasItem::new(20.0, 80.0, 100.0, 40.0),
/// ]);
/// assert_eq!(bounds.width(), 120.0);
/// assert_eq!(bounds.height(), 120.0);
/// ```
pub fn calculate_bounds(items: &[CanvasItem]) -> Bounds {
    items
        .iter()
        .map(CanvasItem::bounds)
        .reduce(|acc, bounds| acc.merge(&bounds))
        .unwrap_or(PLACEHOLDER_BOUNDS)
}
