//! Saving export payloads to disk.
//!
//! A download goes through a transient handle, the equivalent of an object
//! URL: the payload is first written to an anonymous temporary file in the
//! target directory, which is then "clicked", i.e. persisted under the
//! requested name. If anything fails in between the handle is dropped and the
//! temporary file removed, so a failed download leaves nothing behind.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::{
    ExportError,
    export::{Blob, ExportPayload},
    options::ExportFormat,
};

/// Writes payloads into a download directory.
#[derive(Debug, Clone)]
pub struct Downloader {
    dir: PathBuf,
}

impl Downloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saves `blob` as `filename` in the download directory.
    ///
    /// Only the final component of `filename` is used; directories in it are
    /// ignored. Returns the path of the saved file.
    pub fn save_blob(&self, blob: &Blob, filename: &str) -> Result<PathBuf, ExportError> {
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| ExportError::InvalidOption(format!("invalid file name `{filename}`")))?;
        fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(name);

        let url = ObjectUrl::create(&self.dir, blob)?;
        debug!(mime_type = blob.mime_type(), handle:? = url.path(); "Created object URL");
        url.click(&target)?;

        info!(path:? = target, bytes = blob.len(); "Download saved");
        Ok(target)
    }

    /// Saves SVG markup as `filename`.
    pub fn save_markup(&self, markup: &str, filename: &str) -> Result<PathBuf, ExportError> {
        let blob = Blob::new(markup.as_bytes().to_vec(), ExportFormat::Svg.mime_type());
        self.save_blob(&blob, filename)
    }

    /// Saves whichever payload an export produced.
    pub fn save_payload(
        &self,
        payload: &ExportPayload,
        filename: &str,
    ) -> Result<PathBuf, ExportError> {
        match payload {
            ExportPayload::Binary(blob) => self.save_blob(blob, filename),
            ExportPayload::Markup(markup) => self.save_markup(markup, filename),
        }
    }
}

/// Transient handle to a payload that has not been saved yet.
///
/// Dropping it without clicking revokes it.
struct ObjectUrl {
    file: NamedTempFile,
}

impl ObjectUrl {
    fn create(dir: &Path, blob: &Blob) -> Result<Self, ExportError> {
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(blob.bytes())?;
        file.flush()?;
        Ok(Self { file })
    }

    fn path(&self) -> &Path {
        self.file.path()
    }

    fn click(self, target: &Path) -> Result<(), ExportError> {
        self.file
            .persist(target)
            .map_err(|err| ExportError::Io(err.error))?;
        Ok(())
    }
}
