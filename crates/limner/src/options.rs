//! Export options.
//!
//! [`ExportOptions`] keeps the requested format as the raw string the caller
//! supplied; it is parsed into an [`ExportFormat`] only when an export is
//! dispatched, so an unsupported value is reported by name after the surface
//! and item checks have run.

use std::{path::Path, str::FromStr};

use serde::Deserialize;

use limner_core::color::Color;

use crate::ExportError;

/// Padding applied around the item bounds when none is requested.
pub const DEFAULT_PADDING: f32 = 40.0;

/// Background sentinel meaning "no background".
pub const TRANSPARENT: &str = "transparent";

/// Output encodings an export can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Svg,
    Pdf,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    /// Parses a format name.
    ///
    /// # Examples
    ///
    /// ```
    /// use limner::options::ExportFormat;
    ///
    /// assert_eq!("jpg".parse::<ExportFormat>().unwrap(), ExportFormat::Jpeg);
    /// assert!("bmp".parse::<ExportFormat>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl ExportFormat {
    /// Guesses the format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        extension.parse()
    }

    /// Canonical name, also used as file extension.
    pub fn name(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Svg => "image/svg+xml;charset=utf-8",
            Self::Pdf => "application/pdf",
        }
    }
}

/// Quality tier of raster exports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    #[default]
    High,
    Medium,
    Low,
}

impl Quality {
    /// Encoder quality as a fraction: high 1.0, medium 0.8, low 0.6.
    pub fn factor(self) -> f32 {
        match self {
            Self::High => 1.0,
            Self::Medium => 0.8,
            Self::Low => 0.6,
        }
    }

    /// JPEG encoder quality on the 1-100 scale.
    pub fn jpeg_quality(self) -> u8 {
        (self.factor() * 100.0).round() as u8
    }
}

/// Resolved background of an export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    Transparent,
    Color(Color),
}

impl Background {
    /// Parses a color string or the [`TRANSPARENT`] sentinel.
    pub fn parse(value: &str) -> Result<Self, ExportError> {
        if value.trim().eq_ignore_ascii_case(TRANSPARENT) {
            return Ok(Self::Transparent);
        }
        Color::new(value.trim())
            .map(Self::Color)
            .map_err(|err| ExportError::InvalidOption(format!("background: {err}")))
    }

    /// Fill used by raster exports.
    ///
    /// The raster path cannot remove the background, so a transparent request
    /// is painted opaque white.
    pub fn raster_fill(self) -> Color {
        match self {
            Self::Transparent => Color::white(),
            Self::Color(color) => color,
        }
    }

    /// Fill used by vector exports; transparent means no fill at all.
    pub fn vector_fill(self) -> Option<Color> {
        match self {
            Self::Transparent => None,
            Self::Color(color) => Some(color),
        }
    }
}

/// Watermark settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WatermarkOptions {
    enabled: bool,
    text: String,
}

impl WatermarkOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            enabled: true,
            text: text.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the text to stamp, if the watermark is enabled and the text
    /// is non-empty. Whitespace counts as text.
    pub fn active_text(&self) -> Option<&str> {
        (self.enabled && !self.text.is_empty()).then_some(self.text.as_str())
    }
}

/// Configuration of a single export.
///
/// Deserializes from snake_case or camelCase keys. The watermark may be given
/// as a nested `watermark = { enabled, text }` table or as the flat
/// `include_watermark` / `watermark_text` keys; flat keys win over the table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ExportOptionsFile")]
pub struct ExportOptions {
    format: String,
    padding: Option<f32>,
    background: String,
    scale: f32,
    quality: Quality,
    include_grid: bool,
    watermark: WatermarkOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExportOptionsFile {
    format: Option<String>,
    padding: Option<f32>,
    #[serde(alias = "background_color", alias = "backgroundColor")]
    background: Option<String>,
    scale: Option<f32>,
    quality: Option<Quality>,
    #[serde(alias = "show_grid", alias = "showGrid", alias = "includeGrid")]
    include_grid: Option<bool>,
    watermark: Option<WatermarkOptions>,
    #[serde(alias = "includeWatermark")]
    include_watermark: Option<bool>,
    #[serde(alias = "watermarkText")]
    watermark_text: Option<String>,
}

impl From<ExportOptionsFile> for ExportOptions {
    fn from(file: ExportOptionsFile) -> Self {
        let defaults = Self::default();
        let mut watermark = file.watermark.unwrap_or_default();
        if let Some(enabled) = file.include_watermark {
            watermark.enabled = enabled;
        }
        if let Some(text) = file.watermark_text {
            watermark.text = text;
        }
        Self {
            format: file.format.unwrap_or(defaults.format),
            padding: file.padding,
            background: file.background.unwrap_or(defaults.background),
            scale: file.scale.unwrap_or(defaults.scale),
            quality: file.quality.unwrap_or(defaults.quality),
            include_grid: file.include_grid.unwrap_or(defaults.include_grid),
            watermark,
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png.name().to_string(),
            padding: None,
            background: "white".to_string(),
            scale: 1.0,
            quality: Quality::default(),
            include_grid: false,
            watermark: WatermarkOptions::default(),
        }
    }
}

impl ExportOptions {
    /// Creates options for `format` with every other setting at its default.
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_grid(mut self, include_grid: bool) -> Self {
        self.include_grid = include_grid;
        self
    }

    pub fn with_watermark(mut self, watermark: WatermarkOptions) -> Self {
        self.watermark = watermark;
        self
    }

    /// The requested format, as supplied.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Padding around the bounds, [`DEFAULT_PADDING`] when unspecified.
    pub fn padding(&self) -> f32 {
        self.padding.unwrap_or(DEFAULT_PADDING)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn include_grid(&self) -> bool {
        self.include_grid
    }

    pub fn watermark(&self) -> &WatermarkOptions {
        &self.watermark
    }

    /// Parses the requested format.
    pub fn parse_format(&self) -> Result<ExportFormat, ExportError> {
        self.format.parse()
    }

    /// Parses the requested background.
    pub fn background(&self) -> Result<Background, ExportError> {
        Background::parse(&self.background)
    }

    /// Checks the numeric settings and the background.
    pub fn validate(&self) -> Result<(), ExportError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ExportError::InvalidOption(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }
        let padding = self.padding();
        if !padding.is_finite() || padding < 0.0 {
            return Err(ExportError::InvalidOption(format!(
                "padding must be a non-negative number, got {padding}"
            )));
        }
        self.background().map(|_| ())
    }
}
