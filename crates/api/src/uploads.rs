//! Storage of uploaded images under the public directory.
//!
//! Files are written to `<public_dir>/images/` with names from
//! [`formreturn_core::upload::generate_file_name`] and referenced by their
//! root-relative `/images/...` path.

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use formreturn_core::upload::{generate_file_name, public_path, ImageSlot};
use tokio::io::AsyncWriteExt;

/// A file part received for one image slot.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub slot: ImageSlot,
    /// Filename as sent by the client; only its extension is used.
    pub file_name: String,
    pub bytes: Bytes,
}

/// Public paths written for one request, by slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredImages {
    pub image1: Option<String>,
    pub image2: Option<String>,
}

impl StoredImages {
    fn set(&mut self, slot: ImageSlot, path: String) {
        match slot {
            ImageSlot::Image1 => self.image1 = Some(path),
            ImageSlot::Image2 => self.image2 = Some(path),
        }
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.image1.iter().chain(self.image2.iter()).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(public_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: public_dir.as_ref().join("images"),
        }
    }

    /// Directory the files are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write one upload and return its public path.
    ///
    /// Never overwrites an existing file.
    pub async fn save(&self, file: &UploadedFile) -> std::io::Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let name = generate_file_name(file.slot, &file.file_name);
        let mut out = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.dir.join(&name))
            .await?;
        out.write_all(&file.bytes).await?;
        out.flush().await?;

        tracing::debug!(
            slot = file.slot.field_name(),
            file = %name,
            bytes = file.bytes.len(),
            "Stored upload"
        );
        Ok(public_path(&name))
    }

    /// Write every upload. If one write fails, the files already written for
    /// this call are removed before the error is returned.
    pub async fn save_all(&self, files: &[UploadedFile]) -> std::io::Result<StoredImages> {
        let mut stored = StoredImages::default();
        for file in files {
            match self.save(file).await {
                Ok(path) => stored.set(file.slot, path),
                Err(e) => {
                    self.discard(&stored).await;
                    return Err(e);
                }
            }
        }
        Ok(stored)
    }

    /// Best-effort removal of files written by [`UploadStore::save_all`].
    pub async fn discard(&self, stored: &StoredImages) {
        for path in stored.paths() {
            let Some(name) = Path::new(path).file_name() else {
                continue;
            };
            if let Err(e) = tokio::fs::remove_file(self.dir.join(name)).await {
                tracing::warn!(path, error = %e, "Failed to remove orphaned upload");
            }
        }
    }
}
