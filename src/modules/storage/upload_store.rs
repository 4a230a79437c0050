//! Local disk storage for uploaded photos

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::error::Result;
use crate::shared::constants::UPLOADS_URL_PREFIX;

/// A photo written to the uploads directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Generated file name, unique per upload
    pub file_name: String,
    /// Location on disk
    pub path: PathBuf,
    /// Public URL, e.g. `/uploads/<file_name>`
    pub url: String,
}

pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Create the uploads directory if it does not exist
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write an uploaded image under a fresh name, keeping its extension
    pub async fn save_image(&self, data: &[u8], original_filename: &str) -> Result<StoredImage> {
        let extension = Path::new(original_filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_else(|| "bin".to_string());

        let file_name = format!("{}.{}", Uuid::new_v4(), extension);
        let path = self.dir.join(&file_name);

        tokio::fs::write(&path, data).await?;
        debug!("Image stored: {} ({} bytes)", path.display(), data.len());

        Ok(StoredImage {
            url: format!("{}/{}", UPLOADS_URL_PREFIX, file_name),
            file_name,
            path,
        })
    }

    /// Best-effort removal of an image whose request failed afterwards
    pub async fn discard(&self, image: &StoredImage) {
        if let Err(e) = tokio::fs::remove_file(&image.path).await {
            warn!("Failed to remove orphaned upload {}: {}", image.path.display(), e);
        }
    }
}

/// MIME type of a stored image, derived from its extension
pub fn content_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_image_generates_unique_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("uploads")).await.unwrap();

        let first = store.save_image(b"one", "Trash.PNG").await.unwrap();
        let second = store.save_image(b"two", "Trash.PNG").await.unwrap();

        assert_ne!(first.file_name, second.file_name);
        assert!(first.file_name.ends_with(".png"));
        assert_eq!(first.url, format!("/uploads/{}", first.file_name));
        assert_eq!(std::fs::read(&first.path).unwrap(), b"one");
    }

    #[tokio::test]
    async fn test_discard_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path()).await.unwrap();

        let image = store.save_image(b"data", "a.jpg").await.unwrap();
        store.discard(&image).await;
        assert!(!image.path.exists());
    }

    #[test]
    fn test_content_type_for_path() {
        assert_eq!(content_type_for_path(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(content_type_for_path(Path::new("a.webp")), "image/webp");
        assert_eq!(
            content_type_for_path(Path::new("a")),
            "application/octet-stream"
        );
    }
}
