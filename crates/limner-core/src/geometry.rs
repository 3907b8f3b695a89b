//! Scene-space geometry.
//!
//! - [`Point`] - a position, used for node origins and line vertices
//! - [`Size`] - the extent of a shape
//! - [`Bounds`] - an axis-aligned box stored as min/max corners; export
//!   regions, item extents and node footprints are all `Bounds`
//!
//! Coordinates follow SVG: x grows to the right and y grows downwards.
//! Nodes are anchored at their top-left corner, as the editor stores them.

use serde::Deserialize;

/// A position in scene space.
///
/// ```
/// # use limner_core::geometry::Point;
/// let tip = Point::new(100.0, 40.0).add_point(Point::new(10.0, 5.0));
/// assert_eq!((tip.x(), tip.y()), (110.0, 45.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// True for the scene origin.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Offsets this point by `offset`.
    pub fn add_point(self, offset: Point) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y)
    }
}

/// Width and height of a shape, in scene units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }
}

/// An axis-aligned box in scene space.
///
/// Built from a top-left corner plus extent, but stored as its min and max
/// corners so that merging and padding never recompute widths.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// ```
    /// # use limner_core::geometry::Bounds;
    /// let tank = Bounds::new(10.0, 20.0, 30.0, 40.0);
    /// assert_eq!((tank.max_x(), tank.max_y()), (40.0, 60.0));
    /// ```
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + width,
            max_y: y + height,
        }
    }

    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self::new(top_left.x, top_left.y, size.width, size.height)
    }

    /// Left edge; same as [`Bounds::min_x`].
    pub fn x(self) -> f32 {
        self.min_x
    }

    /// Top edge; same as [`Bounds::min_y`].
    pub fn y(self) -> f32 {
        self.min_y
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// The top-left corner.
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// False if any corner coordinate is NaN or infinite.
    pub fn is_finite(self) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite())
    }

    /// The smallest box enclosing both `self` and `other`.
    ///
    /// ```
    /// # use limner_core::geometry::Bounds;
    /// let tank = Bounds::new(0.0, 0.0, 100.0, 50.0);
    /// let pump = Bounds::new(20.0, 80.0, 100.0, 40.0);
    /// assert_eq!(tank.merge(&pump), Bounds::new(0.0, 0.0, 120.0, 120.0));
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Shifts the box by `offset` without resizing it.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Grows the box by `padding` on every side.
    ///
    /// ```
    /// # use limner_core::geometry::Bounds;
    /// let region = Bounds::new(0.0, 0.0, 120.0, 120.0).add_padding(40.0);
    /// assert_eq!(region, Bounds::new(-40.0, -40.0, 200.0, 200.0));
    /// ```
    pub fn add_padding(&self, padding: f32) -> Self {
        Self {
            min_x: self.min_x - padding,
            min_y: self.min_y - padding,
            max_x: self.max_x + padding,
            max_y: self.max_y + padding,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_offset() {
        let vertex = Point::new(1.0, 2.0).add_point(Point::new(3.0, 4.0));
        assert_eq!(vertex, Point::new(4.0, 6.0));
        assert!(Point::default().is_zero());
        assert!(!vertex.is_zero());
    }

    #[test]
    fn test_bounds_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(30.0, 40.0));
        assert_eq!(bounds, Bounds::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(bounds.min_point(), Point::new(10.0, 20.0));
        assert_eq!(bounds.to_size(), Size::new(30.0, 40.0));
    }

    #[test]
    fn test_bounds_merge_disjoint() {
        let merged = Bounds::new(0.0, 0.0, 50.0, 50.0).merge(&Bounds::new(100.0, 100.0, 20.0, 20.0));
        assert_approx_eq!(f32, merged.width(), 120.0);
        assert_approx_eq!(f32, merged.height(), 120.0);
    }

    #[test]
    fn test_bounds_translate_keeps_size() {
        let bounds = Bounds::new(10.0, 20.0, 5.0, 5.0).translate(Point::new(-10.0, 5.0));
        assert_eq!(bounds.min_point(), Point::new(0.0, 25.0));
        assert_eq!(bounds.to_size(), Size::new(5.0, 5.0));
    }

    #[test]
    fn test_bounds_zero_padding_is_identity() {
        let flat = Bounds::new(5.0, 5.0, 10.0, 0.0);
        assert_eq!(flat.add_padding(0.0), flat);
    }

    #[test]
    fn test_bounds_is_finite() {
        assert!(Bounds::new(0.0, 0.0, 1.0, 1.0).is_finite());
        assert!(!Bounds::new(f32::INFINITY, 0.0, 1.0, 1.0).is_finite());
        assert!(!Bounds::new(0.0, f32::NAN, 1.0, 1.0).is_finite());
    }
}
