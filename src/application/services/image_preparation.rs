use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use crate::application::ports::PreparedImage;

pub const MAX_VLM_DIMENSION: u32 = 1024;
pub const JPEG_QUALITY: u8 = 85;

#[derive(Debug, thiserror::Error)]
pub enum ImagePreparationError {
    #[error("image could not be decoded: {0}")]
    Decode(String),
    #[error("image could not be encoded: {0}")]
    Encode(String),
    #[error("image preparation task failed: {0}")]
    Task(String),
}

/// Decodes an upload, shrinks it to fit the VLM input box and re-encodes it as
/// base64 JPEG.
pub fn prepare_image(data: &[u8]) -> Result<PreparedImage, ImagePreparationError> {
    let decoded =
        image::load_from_memory(data).map_err(|e| ImagePreparationError::Decode(e.to_string()))?;

    let resized = if decoded.width() > MAX_VLM_DIMENSION || decoded.height() > MAX_VLM_DIMENSION {
        decoded.resize(MAX_VLM_DIMENSION, MAX_VLM_DIMENSION, FilterType::Lanczos3)
    } else {
        decoded
    };

    let rgb = resized.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| ImagePreparationError::Encode(e.to_string()))?;

    Ok(PreparedImage {
        base64_jpeg: general_purpose::STANDARD.encode(buffer.into_inner()),
        width,
        height,
    })
}

/// Runs [`prepare_image`] on the blocking pool.
pub async fn prepare_image_blocking(data: Bytes) -> Result<PreparedImage, ImagePreparationError> {
    tokio::task::spawn_blocking(move || prepare_image(&data))
        .await
        .map_err(|e| ImagePreparationError::Task(e.to_string()))?
}
