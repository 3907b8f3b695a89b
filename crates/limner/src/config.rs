//! Configuration types for Limner exports.
//!
//! All types implement [`serde::Deserialize`] so that they can be loaded from
//! a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`ExportOptions`] - Defaults for every export, under `[export]`.
//! - [`RenderConfig`] - Rasterizer settings, under `[render]`.
//! - [`DownloadConfig`] - Where downloads are saved, under `[download]`.
//!
//! # Example
//!
//! ```
//! # use limner::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.export().format(), "png");
//! assert!(config.render().system_fonts());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::options::ExportOptions;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Export defaults section.
    #[serde(default)]
    export: ExportOptions,

    /// Rasterizer section.
    #[serde(default)]
    render: RenderConfig,

    /// Download section.
    #[serde(default)]
    download: DownloadConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(export: ExportOptions, render: RenderConfig, download: DownloadConfig) -> Self {
        Self {
            export,
            render,
            download,
        }
    }

    /// Returns the export defaults.
    pub fn export(&self) -> &ExportOptions {
        &self.export
    }

    /// Returns the rasterizer configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the download configuration.
    pub fn download(&self) -> &DownloadConfig {
        &self.download
    }
}

fn default_system_fonts() -> bool {
    true
}

/// Rasterizer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Load the fonts installed on the system so raster text is drawn.
    #[serde(default = "default_system_fonts")]
    system_fonts: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            system_fonts: default_system_fonts(),
        }
    }
}

impl RenderConfig {
    pub fn new(system_fonts: bool) -> Self {
        Self { system_fonts }
    }

    pub fn system_fonts(&self) -> bool {
        self.system_fonts
    }
}

/// Download configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DownloadConfig {
    /// Directory downloads are saved in; the working directory when unset.
    #[serde(default)]
    dir: Option<PathBuf>,
}

impl DownloadConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Returns the download directory, falling back to the working directory.
    pub fn dir(&self) -> &Path {
        self.dir.as_deref().unwrap_or_else(|| Path::new("."))
    }
}
