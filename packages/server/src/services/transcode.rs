use std::fmt;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, GenericImageView};

/// Maximum preview edge length in pixels.
pub const PREVIEW_MAX_DIMENSION: u32 = 100;

/// JPEG quality used when re-encoding previews.
const PREVIEW_JPEG_QUALITY: u8 = 80;

/// Result of transcoding an upload: the bounded preview plus what the
/// original actually is.
pub struct Transcoded {
    /// Re-encoded JPEG preview, at most `PREVIEW_MAX_DIMENSION` per edge.
    pub preview: Vec<u8>,
    /// Detected MIME type of the *original* bytes (e.g. `image/png`).
    pub media_type: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("bytes cannot be decoded as a raster image")]
    UnsupportedFormat,
    #[error("failed to encode preview: {0}")]
    Encode(#[from] image::ImageError),
}

/// Produce a compact preview from raw image bytes.
///
/// Pure and deterministic: detect the format, decode, bound the dimensions
/// to `PREVIEW_MAX_DIMENSION` preserving aspect ratio (never upscaling),
/// and re-encode as JPEG. No state, no I/O.
pub fn transcode(raw: &[u8]) -> Result<Transcoded, TranscodeError> {
    let format = image::guess_format(raw).map_err(|_| TranscodeError::UnsupportedFormat)?;
    let img = image::load_from_memory_with_format(raw, format)
        .map_err(|_| TranscodeError::UnsupportedFormat)?;

    let (width, height) = img.dimensions();
    let bounded = if width > PREVIEW_MAX_DIMENSION || height > PREVIEW_MAX_DIMENSION {
        img.thumbnail(PREVIEW_MAX_DIMENSION, PREVIEW_MAX_DIMENSION)
    } else {
        img
    };

    Ok(Transcoded {
        preview: encode_jpeg(&bounded)?,
        media_type: format.to_mime_type(),
    })
}

fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    // JPEG has no alpha channel; flatten first.
    let rgb = img.to_rgb8();
    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, PREVIEW_JPEG_QUALITY);
    encoder.encode(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(out)
}

impl fmt::Debug for Transcoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transcoded")
            .field("preview_len", &self.preview.len())
            .field("media_type", &self.media_type)
            .finish()
    }
}
