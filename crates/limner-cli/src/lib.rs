//! Limner CLI library
//!
//! This module contains the core CLI logic: load a scene file, export it and
//! save the result.

pub mod error_adapter;
pub mod scene_file;

mod args;
mod config;
mod error;

pub use args::Args;
pub use error::CliError;

use std::path::{Path, PathBuf};

use log::info;

use limner::{
    Exporter,
    download::Downloader,
    options::{ExportFormat, ExportOptions, WatermarkOptions},
};

use scene_file::SceneFile;

/// Run the Limner CLI application
///
/// This function loads the scene file, exports it in the requested format
/// and saves the payload as the output file.
///
/// The format is taken from `--format`, then from the output file extension,
/// then from the `[export]` section of the configuration.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid scene files
/// - Export errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Exporting scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let scene = SceneFile::load(&args.input)?;
    let options = export_options(args, app_config.export());

    let exporter = Exporter::new(&app_config);
    let payload = exporter.export(Some(scene.surface()), &scene.items(), &options)?;

    let (dir, filename) = output_target(&args.output, app_config.download().dir());
    let saved = Downloader::new(dir).save_payload(&payload, &filename)?;

    info!(output_file = saved.display().to_string(); "Export saved");

    Ok(())
}

fn export_options(args: &Args, defaults: &ExportOptions) -> ExportOptions {
    let format = args.format.clone().or_else(|| {
        ExportFormat::from_path(&args.output)
            .ok()
            .map(|format| format.name().to_string())
    });

    let mut options = defaults.clone();
    if let Some(format) = format {
        options = options.with_format(format);
    }
    if let Some(scale) = args.scale {
        options = options.with_scale(scale);
    }
    if let Some(text) = &args.watermark {
        options = options.with_watermark(WatermarkOptions::new(text.as_str()));
    }
    options
}

/// Splits the output path into the download directory and file name.
///
/// A bare file name is saved in the configured download directory.
fn output_target(output: &str, download_dir: &Path) -> (PathBuf, String) {
    let path = Path::new(output);
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(download_dir);
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| output.to_string());
    (dir.to_path_buf(), filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(output: &str, format: Option<&str>) -> Args {
        Args {
            input: "scene.toml".to_string(),
            output: output.to_string(),
            format: format.map(str::to_string),
            scale: None,
            watermark: None,
            config: None,
            log_level: "off".to_string(),
        }
    }

    #[test]
    fn test_format_precedence() {
        let defaults = ExportOptions::new("pdf");

        let options = export_options(&args("out.svg", Some("jpg")), &defaults);
        assert_eq!(options.format(), "jpg");

        let options = export_options(&args("out.svg", None), &defaults);
        assert_eq!(options.format(), "svg");

        let options = export_options(&args("out", None), &defaults);
        assert_eq!(options.format(), "pdf");
    }

    #[test]
    fn test_scale_and_watermark_override_defaults() {
        let mut args = args("out.png", None);
        args.scale = Some(3.0);
        args.watermark = Some("DRAFT".to_string());

        let options = export_options(&args, &ExportOptions::default());
        assert_eq!(options.scale(), 3.0);
        assert_eq!(options.watermark().active_text(), Some("DRAFT"));
    }

    #[test]
    fn test_output_target() {
        let downloads = Path::new("downloads");

        assert_eq!(
            output_target("out.png", downloads),
            (PathBuf::from("downloads"), "out.png".to_string())
        );
        assert_eq!(
            output_target("build/out.png", downloads),
            (PathBuf::from("build"), "out.png".to_string())
        );
    }
}
