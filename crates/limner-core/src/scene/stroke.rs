//! Stroke and line-style definitions for scene nodes.
//!
//! - [`StrokeDefinition`]: color, width and dash style of an outline
//! - [`StrokeStyle`]: line patterns (solid, dashed, dotted, custom)
//! - [`apply_stroke!`](crate::apply_stroke!): applies stroke attributes to SVG elements
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#000000"`, `0.5` |
//! | `width` | `stroke-width` | `2.0` |
//! | `style` | `stroke-dasharray` | `"5,5"`, `"10,5,2,5"` |

use std::{convert::Infallible, str::FromStr};

use serde::Deserialize;

use crate::color::Color;

/// Defines the dash pattern of a stroke.
///
/// Each variant maps to an SVG `stroke-dasharray` value:
/// - `Solid`: No dasharray attribute
/// - `Dashed`: "5,5"
/// - `Dotted`: "2,3"
/// - `Custom(pattern)`: Uses the provided pattern string
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(from = "String")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    /// Custom SVG dasharray pattern, e.g. "10,5,2,3"
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "solid" => Self::Solid,
            "dashed" => Self::Dashed,
            "dotted" => Self::Dotted,
            // Any other value is treated as a custom dasharray pattern
            _ => Self::Custom(s.to_string()),
        })
    }
}

impl From<String> for StrokeStyle {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(style) => style,
            Err(never) => match never {},
        }
    }
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

fn default_width() -> f32 {
    1.0
}

/// Outline of a scene node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StrokeDefinition {
    #[serde(default)]
    color: Color,
    #[serde(default = "default_width")]
    width: f32,
    #[serde(default)]
    style: StrokeStyle,
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), default_width())
    }
}

impl StrokeDefinition {
    /// Creates a solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Creates a dashed stroke with the given color and width.
    pub fn dashed(color: Color, width: f32) -> Self {
        Self::new(color, width).with_style(StrokeStyle::Dashed)
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }
}

/// Applies all stroke attributes of a [`StrokeDefinition`] to an SVG element.
///
/// ```
/// use limner_core::{color::Color, scene::StrokeDefinition};
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::dashed(Color::new("blue").unwrap(), 2.0);
/// let rect = limner_core::apply_stroke!(svg_element::Rectangle::new(), &stroke);
/// assert!(rect.to_string().contains("stroke-dasharray=\"5,5\""));
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_hex())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(*stroke.style(), StrokeStyle::Solid);
    }

    #[test]
    fn test_stroke_style_from_str() {
        assert_eq!("dashed".parse::<StrokeStyle>(), Ok(StrokeStyle::Dashed));
        assert_eq!("dotted".parse::<StrokeStyle>(), Ok(StrokeStyle::Dotted));
        assert_eq!(
            StrokeStyle::from("4,2".to_string()),
            StrokeStyle::Custom("4,2".to_string())
        );
    }

    #[test]
    fn test_stroke_style_svg_value() {
        assert_eq!(StrokeStyle::Solid.to_svg_value(), None);
        assert_eq!(StrokeStyle::Dotted.to_svg_value().as_deref(), Some("2,3"));
    }

    #[test]
    fn test_apply_stroke_solid_has_no_dasharray() {
        let stroke = StrokeDefinition::new(Color::new("red").unwrap(), 3.0);
        let rect = crate::apply_stroke!(svg::node::element::Rectangle::new(), &stroke).to_string();
        assert!(rect.contains("stroke=\"#ff0000\""));
        assert!(rect.contains("stroke-width=\"3\""));
        assert!(!rect.contains("stroke-dasharray"));
    }
}
