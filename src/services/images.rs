//! Transforms uploaded product images into their canonical stored form:
//! bounded width, JPEG re-encoded, filed under the product's category.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use thiserror::Error;

use crate::config::ImageConfig;

/// Errors raised while transforming or storing an uploaded image.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The upload could not be decoded or re-encoded.
    #[error("failed to process image: {0}")]
    Processing(String),
    /// The target directory or file could not be written.
    #[error("failed to store image: {0}")]
    Storage(#[from] std::io::Error),
}

/// An upload received from the HTTP layer.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub original_name: String,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, original_name: impl Into<String>) -> Self {
        Self {
            bytes,
            original_name: original_name.into(),
        }
    }
}

/// A durably stored image. Any failure later in the surrounding workflow must
/// delete `path` explicitly; nothing rolls the file back automatically.
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Public URL the file is served under.
    pub url: String,
    /// Absolute or root-relative storage path, kept for deletion.
    pub path: PathBuf,
}

/// Writes transformed uploads below a fixed storage root and maps them to
/// public URLs.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
    base_url: String,
    max_width: u32,
    jpeg_quality: u8,
}

impl ImageStore {
    pub fn new(config: &ImageConfig) -> Self {
        Self {
            root: config.storage_root.clone(),
            base_url: config.public_base_url.trim_end_matches('/').to_string(),
            max_width: config.max_width,
            jpeg_quality: config.jpeg_quality,
        }
    }

    /// Transform `upload` and store it under the category's directory.
    ///
    /// The image is decoded, resized down to the configured width when wider
    /// (aspect ratio preserved, never upscaled) and re-encoded as JPEG. The
    /// per-category directory is created if missing; `create_dir_all` makes
    /// that safe against concurrent requests targeting the same new category.
    pub fn store_product_image(
        &self,
        upload: &ImageUpload,
        category_id: i32,
    ) -> Result<StoredImage, ImageError> {
        let dir = self.root.join("products").join(category_id.to_string());
        fs::create_dir_all(&dir)?;

        let filename = safe_file_name(&upload.original_name);
        let path = dir.join(&filename);

        let img = image::load_from_memory(&upload.bytes)
            .map_err(|e| ImageError::Processing(e.to_string()))?;

        let img = if img.width() > self.max_width {
            let height = (u64::from(img.height()) * u64::from(self.max_width)
                / u64::from(img.width()))
            .max(1) as u32;
            img.resize(self.max_width, height, FilterType::Lanczos3)
        } else {
            img
        };

        let mut buffer = Vec::new();
        {
            let mut cursor = Cursor::new(&mut buffer);
            let encoder = JpegEncoder::new_with_quality(&mut cursor, self.jpeg_quality);
            img.to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| ImageError::Processing(e.to_string()))?;
        }

        fs::write(&path, &buffer)?;

        let url = format!("{}/products/{}/{}", self.base_url, category_id, filename);

        Ok(StoredImage { url, path })
    }

    /// Delete a stored image by its storage path. Missing files are fine.
    pub fn delete_image(&self, path: &Path) -> Result<(), ImageError> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Delete a stored image by its public URL. URLs outside this store's
    /// base are ignored.
    pub fn delete_image_by_url(&self, url: &str) -> Result<(), ImageError> {
        match self.path_for_url(url) {
            Some(path) => self.delete_image(&path),
            None => Ok(()),
        }
    }

    fn path_for_url(&self, url: &str) -> Option<PathBuf> {
        let relative = url.strip_prefix(&self.base_url)?.trim_start_matches('/');
        if relative.is_empty() || relative.contains("..") {
            return None;
        }
        Some(self.root.join(relative))
    }
}

/// Derive a collision-resistant file name: the original stem lower-cased with
/// every character outside `[a-z0-9-_]` replaced by `-`, a millisecond
/// timestamp appended, and the original extension kept.
fn safe_file_name(original: &str) -> String {
    let path = Path::new(original);
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("image");

    let slug: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let slug = if slug.is_empty() {
        "image".to_string()
    } else {
        slug
    };

    let timestamp = chrono::Utc::now().timestamp_millis();

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{slug}-{timestamp}.{}", ext.to_ascii_lowercase()),
        None => format!("{slug}-{timestamp}.jpg"),
    }
}
