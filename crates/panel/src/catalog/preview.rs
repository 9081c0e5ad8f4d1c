//! Local image selection and preview.
//!
//! The preview is built from the file on disk before anything is uploaded.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

use crate::api::ImageUpload;

/// Maximum width adapters should draw the preview thumbnail at.
pub const PREVIEW_MAX_WIDTH_PX: u32 = 200;

/// Errors that can occur when selecting an image.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// The chosen file could not be read.
    #[error("Failed to read image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Thumbnail shown next to the product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePreview {
    /// Inline `data:` URL of a locally chosen file.
    Local(String),
    /// Image already stored by the backend.
    Remote(String),
}

impl ImagePreview {
    /// Preview of a file about to be uploaded.
    #[must_use]
    pub fn from_upload(image: &ImageUpload) -> Self {
        Self::Local(format!(
            "data:{};base64,{}",
            image.mime_type,
            STANDARD.encode(&image.bytes)
        ))
    }

    /// Image source for drawing.
    #[must_use]
    pub fn src(&self) -> &str {
        match self {
            Self::Local(src) | Self::Remote(src) => src,
        }
    }
}

impl ImageUpload {
    /// Read an image file for upload, guessing its MIME type from the
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns `PreviewError::Read` if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, PreviewError> {
        let bytes = std::fs::read(path).map_err(|source| PreviewError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());

        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }
}
