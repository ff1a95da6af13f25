//! Filesystem-level image storage.
//!
//! Stores uploaded images under `{uploads_dir}/{segment}/` with generated,
//! collision-free names and removes them again on request.

use std::path::{Path, PathBuf};

use angle_catalog_common::paths::{image_extension, is_plain_file_name};
use angle_catalog_common::{Error, Result};
use uuid::Uuid;

/// Directory under the uploads root that holds angle images.
pub const ANGLE_UPLOADS_SEGMENT: &str = "Angle";

/// Storage for uploaded files referenced by name.
pub trait FileStore: Send + Sync {
    /// Store `data` and return the generated file name.
    ///
    /// The extension is taken from `original_name` and must be an image
    /// extension; anything else is rejected with [`Error::InvalidInput`].
    fn save(&self, original_name: &str, data: &[u8]) -> Result<String>;

    /// Remove a stored file if it exists.
    ///
    /// Returns `Ok(true)` if a file was removed and `Ok(false)` if there was
    /// nothing to remove.
    fn delete_if_exists(&self, name: &str) -> Result<bool>;

    /// Whether a stored file with this name exists.
    fn exists(&self, name: &str) -> bool;
}

/// Filesystem manager for uploaded images.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    dir: PathBuf,
}

impl LocalFileStore {
    /// Create a store writing to `{uploads_dir}/{segment}`.
    pub fn new(uploads_dir: &Path, segment: &str) -> Self {
        Self {
            dir: uploads_dir.join(segment),
        }
    }

    /// Create the store for angle images.
    pub fn for_angles(uploads_dir: &Path) -> Self {
        Self::new(uploads_dir, ANGLE_UPLOADS_SEGMENT)
    }

    /// Directory the files are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve a stored file name to its path on disk.
    pub fn path_of(&self, name: &str) -> Result<PathBuf> {
        if !is_plain_file_name(name) {
            return Err(Error::invalid_input(format!(
                "Invalid stored file name: {:?}",
                name
            )));
        }
        Ok(self.dir.join(name))
    }
}

impl FileStore for LocalFileStore {
    fn save(&self, original_name: &str, data: &[u8]) -> Result<String> {
        let extension = image_extension(Path::new(original_name))
            .ok_or_else(|| Error::invalid_input("Only image files are allowed"))?;

        std::fs::create_dir_all(&self.dir)?;

        let name = format!("{}.{}", Uuid::new_v4(), extension);
        let path = self.dir.join(&name);
        std::fs::write(&path, data)?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "Stored uploaded image");
        Ok(name)
    }

    fn delete_if_exists(&self, name: &str) -> Result<bool> {
        let path = self.path_of(name)?;
        if !path.exists() {
            return Ok(false);
        }

        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Deleted image file");
                Ok(true)
            }
            // Removed by someone else between the check and the unlink.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, name: &str) -> bool {
        self.path_of(name).map(|p| p.is_file()).unwrap_or(false)
    }
}
