//! Photo normalization before upload
//!
//! Browsers and most image viewers cannot display HEIC, so HEIC photos are
//! converted to JPEG on the client. Every other format is uploaded as-is.

mod heic;

pub use heic::{default_heic_decoder, HeicDecoder, UnsupportedHeicDecoder};

#[cfg(feature = "heif")]
pub use heic::LibheifDecoder;

use crate::error::ImageError;
use crate::types::PhotoFile;
use base64::{engine::general_purpose::STANDARD, Engine};
use image::codecs::jpeg::JpegEncoder;
use std::sync::Arc;

/// JPEG quality used for converted HEIC photos
pub const JPEG_QUALITY: u8 = 90;

pub const JPEG_MIME_TYPE: &str = "image/jpeg";

const HEIC_MIME_TYPES: &[&str] = &["image/heic", "image/heif"];
const HEIC_EXTENSIONS: &[&str] = &["heic", "heif"];

/// A photo ready to be attached to a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPhoto {
    /// The file to upload
    pub asset: PhotoFile,

    /// Locally addressable reference for display before upload
    pub preview: String,

    /// Whether the asset was converted from HEIC
    pub converted: bool,
}

/// Whether the file's declared type or name marks it as HEIC
pub fn is_heic(file: &PhotoFile) -> bool {
    let declared = file.content_type.trim().to_ascii_lowercase();
    if HEIC_MIME_TYPES.contains(&declared.as_str()) {
        return true;
    }
    file.extension()
        .map(|ext| HEIC_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Replace the filename extension with `.jpg`
pub fn jpeg_file_name(file_name: &str) -> String {
    let path = std::path::Path::new(file_name);
    match path.file_stem().and_then(|s| s.to_str()) {
        Some(stem) if path.extension().is_some() => {
            let dir_len = file_name.len() - path.file_name().map_or(0, |n| n.len());
            format!("{}{}.jpg", &file_name[..dir_len], stem)
        }
        _ => format!("{}.jpg", file_name),
    }
}

/// Inline `data:` reference for a photo
pub fn preview_reference(file: &PhotoFile) -> String {
    format!("data:{};base64,{}", file.content_type, STANDARD.encode(&file.bytes))
}

/// Converts HEIC selections to JPEG, passing other files through
#[derive(Clone)]
pub struct PhotoNormalizer {
    decoder: Arc<dyn HeicDecoder>,
}

impl PhotoNormalizer {
    /// Create a normalizer using the HEIC decoder compiled into this build
    pub fn new() -> Self {
        Self {
            decoder: Arc::from(default_heic_decoder()),
        }
    }

    pub fn with_decoder(decoder: impl HeicDecoder + 'static) -> Self {
        Self {
            decoder: Arc::new(decoder),
        }
    }

    /// Normalize a selected file.
    ///
    /// CPU-bound for HEIC input; callers on an async runtime should run it
    /// on a blocking thread.
    pub fn normalize(&self, file: PhotoFile) -> Result<NormalizedPhoto, ImageError> {
        if file.is_empty() {
            return Err(ImageError::EmptyFile(file.file_name));
        }

        if !is_heic(&file) {
            let asset = if file.content_type.trim().is_empty() {
                PhotoFile::from_name(file.file_name, file.bytes)
            } else {
                file
            };
            let preview = preview_reference(&asset);
            return Ok(NormalizedPhoto {
                asset,
                preview,
                converted: false,
            });
        }

        tracing::debug!(file = %file.file_name, size = file.len(), "Converting HEIC photo to JPEG");

        let rgb = self.decoder.decode(&file.bytes)?;
        let mut jpeg = Vec::new();
        {
            let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
            encoder.encode_image(&rgb)?;
        }

        let asset = PhotoFile::new(jpeg_file_name(&file.file_name), JPEG_MIME_TYPE, jpeg);
        tracing::debug!(file = %asset.file_name, size = asset.len(), "HEIC conversion complete");

        let preview = preview_reference(&asset);
        Ok(NormalizedPhoto {
            asset,
            preview,
            converted: true,
        })
    }
}

impl Default for PhotoNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PhotoNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoNormalizer").finish_non_exhaustive()
    }
}
