//! Error type of the CLI.

use std::{io, ops::Range};

use thiserror::Error;

use limner::ExportError;

use crate::config::ConfigError;

/// Everything that can stop a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The scene file is not valid TOML or does not describe a scene.
    #[error("invalid scene file `{path}`: {message}")]
    Scene {
        path: String,
        src: String,
        message: String,
        span: Option<Range<usize>>,
    },

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}
