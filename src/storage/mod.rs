//! Local filesystem store for uploaded images.
//!
//! Records keep only the public path (`/uploads/<folder>/<file>`); the bytes live
//! under the configured upload directory and are served read-only by the router.

use std::path::{Path, PathBuf};

use crate::errors::AppError;

/// URL prefix the upload directory is mounted under.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Upload folder per kind of image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFolder {
    CampCover,
    GroupPicture,
    BlogCover,
}

impl ImageFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFolder::CampCover => "campimg",
            ImageFolder::GroupPicture => "campgrpimg",
            ImageFolder::BlogCover => "blogimg",
        }
    }
}

/// Image formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageFormat {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/gif" => Some(ImageFormat::Gif),
            "image/webp" => Some(ImageFormat::Webp),
            _ => None,
        }
    }

    /// Detect the format from the file signature.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(ImageFormat::Webp)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
        }
    }
}

/// An image received in a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    /// Accept only non-empty PNG, JPEG, GIF or WebP parts whose bytes match the declared type.
    ///
    /// The client file name plays no part in how the image is stored.
    pub fn validate(&self, field: &str) -> Result<ImageFormat, AppError> {
        if self.bytes.is_empty() {
            return Err(AppError::Validation(format!("{} is empty", field)));
        }
        let declared = self
            .content_type
            .as_deref()
            .and_then(ImageFormat::from_content_type)
            .ok_or_else(|| {
                AppError::Validation(format!("{} must be a PNG, JPEG, GIF or WebP image", field))
            })?;

        match ImageFormat::sniff(&self.bytes) {
            Some(actual) if actual == declared => Ok(actual),
            _ => Err(AppError::Validation(format!(
                "{} content does not match its image type",
                field
            ))),
        }
    }
}

/// Writes uploads under a root directory with generated file names.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist an image and return its public path.
    pub async fn save(&self, folder: ImageFolder, image: &UploadedImage) -> Result<String, AppError> {
        let format = image.validate("image")?;
        let dir = self.root.join(folder.as_str());
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = format!("{}.{}", uuid::Uuid::new_v4().simple(), format.extension());
        tokio::fs::write(dir.join(&file_name), &image.bytes).await?;

        tracing::debug!(folder = folder.as_str(), file = %file_name, size = image.bytes.len(), "Image stored");

        Ok(format!("{}/{}/{}", PUBLIC_PREFIX, folder.as_str(), file_name))
    }

    /// Best-effort removal of an image written for a request that later failed.
    pub async fn discard(&self, public_path: &str) {
        let Some(relative) = public_path.strip_prefix(PUBLIC_PREFIX) else {
            return;
        };
        let path = self.root.join(relative.trim_start_matches('/'));
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!("Failed to remove orphaned upload {:?}: {}", path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn png(name: Option<&str>) -> UploadedImage {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(b"pixels");
        UploadedImage {
            file_name: name.map(str::to_string),
            content_type: Some("image/png".to_string()),
            bytes,
        }
    }

    #[test]
    fn test_validate_rejects_non_images() {
        let mut image = png(Some("cover.png"));
        assert_eq!(image.validate("coverImage").unwrap(), ImageFormat::Png);

        image.content_type = Some("text/plain".to_string());
        assert!(image.validate("coverImage").is_err());

        image.content_type = Some("image/svg+xml".to_string());
        assert!(image.validate("coverImage").is_err());

        let empty = UploadedImage {
            bytes: vec![],
            ..png(None)
        };
        assert!(empty.validate("coverImage").is_err());
    }

    #[test]
    fn test_validate_checks_signature_against_declared_type() {
        let html = UploadedImage {
            file_name: Some("evil.html".to_string()),
            content_type: Some("image/png".to_string()),
            bytes: b"<script>alert(1)</script>".to_vec(),
        };
        assert!(html.validate("coverImage").is_err());

        let mislabelled = UploadedImage {
            content_type: Some("image/gif".to_string()),
            ..png(None)
        };
        assert!(mislabelled.validate("coverImage").is_err());
    }

    #[test]
    fn test_sniff_formats() {
        assert_eq!(ImageFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::sniff(b"GIF89a...."), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::sniff(b"RIFF\0\0\0\0WEBPVP8 "), Some(ImageFormat::Webp));
        assert_eq!(ImageFormat::sniff(b"<html>"), None);
        assert_eq!(ImageFormat::from_content_type("Image/JPG"), Some(ImageFormat::Jpeg));
    }

    #[tokio::test]
    async fn test_stored_extension_ignores_client_file_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = ImageStore::new(dir.path());

        for name in ["evil.html", "../../etc/passwd", "Cover.PNG"] {
            let path = store
                .save(ImageFolder::BlogCover, &png(Some(name)))
                .await
                .unwrap();
            assert!(path.ends_with(".png"), "{}", path);
        }
    }

    #[tokio::test]
    async fn test_save_and_discard() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = ImageStore::new(dir.path());

        let path = store
            .save(ImageFolder::BlogCover, &png(Some("a.png")))
            .await
            .unwrap();
        assert!(path.starts_with("/uploads/blogimg/"));

        let on_disk = dir.path().join(path.trim_start_matches("/uploads/"));
        assert!(on_disk.exists());

        store.discard(&path).await;
        assert!(!on_disk.exists());
    }
}
