//! HEIC decoding backends

use crate::error::ImageError;
use image::RgbImage;

/// Trait for decoding HEIC/HEIF containers into RGB pixels
pub trait HeicDecoder: Send + Sync {
    /// Decode the primary image of a HEIC file
    fn decode(&self, bytes: &[u8]) -> Result<RgbImage, ImageError>;
}

/// Get the HEIC decoder this build supports
pub fn default_heic_decoder() -> Box<dyn HeicDecoder> {
    #[cfg(feature = "heif")]
    {
        Box::new(LibheifDecoder::new())
    }
    #[cfg(not(feature = "heif"))]
    {
        Box::new(UnsupportedHeicDecoder)
    }
}

/// Decoder used when the crate is built without libheif
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedHeicDecoder;

impl HeicDecoder for UnsupportedHeicDecoder {
    fn decode(&self, _bytes: &[u8]) -> Result<RgbImage, ImageError> {
        Err(ImageError::HeicUnsupported)
    }
}

/// Decoder backed by the system libheif library
#[cfg(feature = "heif")]
pub struct LibheifDecoder {
    lib: libheif_rs::LibHeif,
}

#[cfg(feature = "heif")]
impl LibheifDecoder {
    pub fn new() -> Self {
        Self {
            lib: libheif_rs::LibHeif::new(),
        }
    }
}

#[cfg(feature = "heif")]
impl Default for LibheifDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "heif")]
impl HeicDecoder for LibheifDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<RgbImage, ImageError> {
        use libheif_rs::{ColorSpace, HeifContext, RgbChroma};

        let ctx =
            HeifContext::read_from_bytes(bytes).map_err(|e| ImageError::Decode(e.to_string()))?;
        let handle = ctx
            .primary_image_handle()
            .map_err(|e| ImageError::Decode(e.to_string()))?;
        let decoded = self
            .lib
            .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
            .map_err(|e| ImageError::Decode(e.to_string()))?;

        let planes = decoded.planes();
        let plane = planes
            .interleaved
            .ok_or_else(|| ImageError::Decode("no interleaved RGB plane".to_string()))?;

        // Rows may be padded beyond width * 3
        let row_len = plane.width as usize * 3;
        let mut rgb = Vec::with_capacity(row_len * plane.height as usize);
        for row in plane.data.chunks(plane.stride).take(plane.height as usize) {
            rgb.extend_from_slice(&row[..row_len]);
        }

        RgbImage::from_raw(plane.width, plane.height, rgb)
            .ok_or_else(|| ImageError::Decode("truncated pixel data".to_string()))
    }
}
