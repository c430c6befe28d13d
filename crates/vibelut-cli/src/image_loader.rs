//! Image loading and saving for the command-line front end.

use std::path::Path;

use vibelut_core::{CoreError, PixelBuffer};

/// Load an image from disk as an 8-bit RGBA buffer.
///
/// Supports common formats via the `image` crate (PNG, JPEG, TIFF, ...).
/// Deeper sources are quantized to 8 bits per channel.
pub fn load_image(path: &Path) -> Result<PixelBuffer, ImageLoadError> {
    let img = image::open(path).map_err(ImageLoadError::Decode)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let buffer = PixelBuffer::new(width, height, rgba.into_raw())?;
    tracing::info!("loaded {} ({width}x{height})", path.display());
    Ok(buffer)
}

/// Write a buffer to disk. The format follows the file extension.
pub fn save_image(path: &Path, buffer: &PixelBuffer) -> Result<(), ImageLoadError> {
    let img = image::RgbaImage::from_raw(buffer.width(), buffer.height(), buffer.as_bytes().to_vec())
        .ok_or(ImageLoadError::Dimensions)?;
    img.save(path).map_err(ImageLoadError::Encode)?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

/// Errors that can occur during image loading and saving.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),
    #[error("pixel data does not match image dimensions")]
    Dimensions,
    #[error(transparent)]
    Buffer(#[from] CoreError),
}
