//! Local-disk image storage.
//!
//! Uploaded images are written into a bucket directory under the configured
//! data root and served back as static files under the public media path.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::{Error, endpoints};

/// The name of the bucket directory under the data root.
const BUCKET_NAME: &str = "media";

/// Writes uploaded images to a bucket directory and hands out stable public
/// URLs for them.
#[derive(Debug, Clone)]
pub struct ImageStore {
    bucket_dir: PathBuf,
}

impl ImageStore {
    /// Open the image store, creating the bucket directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an [Error::ImageStore] if the bucket directory cannot be created.
    pub fn open(data_dir: &Path) -> Result<Self, Error> {
        let bucket_dir = data_dir.join(BUCKET_NAME);

        std::fs::create_dir_all(&bucket_dir).map_err(|error| {
            Error::ImageStore(format!(
                "could not create bucket directory {}: {error}",
                bucket_dir.display()
            ))
        })?;

        Ok(Self { bucket_dir })
    }

    /// The directory that the static file service should serve at the public
    /// media path.
    pub fn bucket_dir(&self) -> &Path {
        &self.bucket_dir
    }

    /// Write image bytes under a generated unique key and return the public
    /// URL for the stored image.
    ///
    /// The key keeps the original file's extension so that the static file
    /// service serves the right content type.
    ///
    /// # Errors
    ///
    /// Returns an [Error::ImageStore] if the file cannot be written.
    pub fn store(&self, original_file_name: &str, bytes: &[u8]) -> Result<String, Error> {
        let key = match extension(original_file_name) {
            Some(extension) => format!("{}.{extension}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };

        let file_path = self.bucket_dir.join(&key);
        std::fs::write(&file_path, bytes).map_err(|error| {
            Error::ImageStore(format!(
                "could not write {}: {error}",
                file_path.display()
            ))
        })?;

        Ok(format!("{}/{key}", endpoints::MEDIA))
    }
}

fn extension(file_name: &str) -> Option<&str> {
    Path::new(file_name)
        .extension()
        .and_then(|extension| extension.to_str())
}
