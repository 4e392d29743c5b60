//! Resolution of submitted file values to files on disk

use crate::config::UploadsConfig;
use crate::error::{Result, ValidatorError};
use crate::form::Element;
use std::path::{Component, Path, PathBuf};

/// Maps a submitted file value to a readable file
pub trait FileResolver: Send + Sync {
    fn resolve(&self, path: &str, element: &Element, primary_key: Option<&str>) -> Result<PathBuf>;
}

/// Directory-backed upload store
///
/// A submitted value is first looked up among the temporary uploads of the
/// current request, then among the files stored for the record:
///
/// - `<temp_dir>/<value>`
/// - `<upload_dir>/<primary key>/<value>`
#[derive(Debug, Clone)]
pub struct UploadStore {
    temp_dir: PathBuf,
    upload_dir: PathBuf,
}

impl UploadStore {
    pub fn new(temp_dir: impl Into<PathBuf>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
            upload_dir: upload_dir.into(),
        }
    }

    pub fn from_config(config: &UploadsConfig) -> Self {
        Self::new(&config.temp_dir, &config.upload_dir)
    }

    fn temporary_file(&self, path: &Path) -> Option<PathBuf> {
        let candidate = self.temp_dir.join(path);
        candidate.is_file().then_some(candidate)
    }

    fn stored_file(&self, path: &Path, primary_key: Option<&str>) -> Option<PathBuf> {
        let primary_key = primary_key.filter(|pk| is_relative_name(Path::new(pk)))?;
        let candidate = self.upload_dir.join(primary_key).join(path);
        candidate.is_file().then_some(candidate)
    }
}

impl FileResolver for UploadStore {
    fn resolve(&self, path: &str, _element: &Element, primary_key: Option<&str>) -> Result<PathBuf> {
        let relative = Path::new(path);
        if path.is_empty() || !is_relative_name(relative) {
            return Err(ValidatorError::FileNotFound(path.to_string()));
        }

        self.temporary_file(relative)
            .or_else(|| self.stored_file(relative, primary_key))
            .ok_or_else(|| ValidatorError::FileNotFound(path.to_string()))
    }
}

/// Only plain relative paths may be joined onto the upload roots
fn is_relative_name(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}
