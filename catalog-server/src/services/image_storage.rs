//! Image Storage Adapter
//!
//! Persists uploaded product photos on the file system under an
//! explicit root handed in at construction (no ambient webroot). Stored
//! names are `<uuid-v4>_<original file name>` inside the `img`
//! subfolder, so the web layer can serve them straight from the root.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::utils::AppError;

/// Subfolder under the storage root where image files live
const IMG_SUBDIR: &str = "img";

/// File-system storage for product images
#[derive(Clone, Debug)]
pub struct ImageStorage {
    root: PathBuf,
}

impl ImageStorage {
    /// `root` is the web-served root; files land in `<root>/img/`
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn img_dir(&self) -> PathBuf {
        self.root.join(IMG_SUBDIR)
    }

    /// Deterministic path for a stored file name
    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.img_dir().join(file_name)
    }

    /// Globally unique stored name for an uploaded file
    pub fn unique_file_name(original: &str) -> String {
        format!("{}_{}", Uuid::new_v4(), original)
    }

    /// Create the image directory if it does not exist yet
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.img_dir())
    }

    /// Write uploaded bytes to disk
    pub async fn save_file(&self, file_name: &str, data: &[u8]) -> Result<(), AppError> {
        fs::create_dir_all(self.img_dir())
            .await
            .map_err(|e| AppError::storage(format!("Failed to create image directory: {e}")))?;
        let path = self.file_path(file_name);
        fs::write(&path, data)
            .await
            .map_err(|e| AppError::storage(format!("Failed to save {}: {e}", path.display())))?;
        tracing::debug!(file = %file_name, size = data.len(), "Image file saved");
        Ok(())
    }

    /// Remove a stored file. A file that is already gone is not an
    /// error; anything else propagates.
    pub async fn delete_file(&self, file_name: &str) -> Result<(), AppError> {
        let path = self.file_path(file_name);
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(file = %file_name, "Image file deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!(
                "Failed to delete {}: {e}",
                path.display()
            ))),
        }
    }

    /// Whether a stored file name currently resolves to a file
    pub fn exists(&self, file_name: &str) -> bool {
        self.file_path(file_name).exists()
    }

    /// The storage root this adapter was built with
    pub fn root(&self) -> &Path {
        &self.root
    }
}
