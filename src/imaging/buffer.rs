//! Pixel buffer type, imaging errors, and conversions to the `image` crate.
//!
//! Callers hand in pixels as a `(height, width, channel)` array of `u8`.
//! Resampling is delegated to `image::imageops`, so 3-channel buffers are
//! converted to [`RgbImage`] and back around every resample.

use image::RgbImage;
use ndarray::{Array3, ArrayView3};
use std::path::PathBuf;
use thiserror::Error;

/// An 8-bit image laid out as `(height, width, channel)`.
pub type PixelBuffer = Array3<u8>;

/// Channel count of a normalized buffer.
pub const RGB_CHANNELS: usize = 3;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("invalid target dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("source image has no pixels ({width}x{height})")]
    EmptySource { width: usize, height: usize },
    #[error("unsupported channel count {0}: expected 1, 3 or 4")]
    UnsupportedChannels(usize),
    #[error("unsupported image shape {0:?}: expected (height, width) or (height, width, channels)")]
    UnsupportedShape(Vec<usize>),
    #[error("expected a {expected}-channel image, got {actual} channels")]
    ChannelMismatch { expected: usize, actual: usize },
    #[error("pixel buffer shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error("pixel budget must be at least 1")]
    ZeroBudget,
    #[error("image is too large: {width}x{height}")]
    TooLarge { width: usize, height: usize },
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// `(width, height)` of a buffer, in the order the `image` crate uses.
pub fn dimensions(image: &ArrayView3<'_, u8>) -> (usize, usize) {
    let (height, width, _) = image.dim();
    (width, height)
}

/// Fail unless `image` has exactly `expected` channels.
pub fn ensure_channels(image: &ArrayView3<'_, u8>, expected: usize) -> Result<(), ImagingError> {
    let actual = image.dim().2;
    if actual != expected {
        return Err(ImagingError::ChannelMismatch { expected, actual });
    }
    Ok(())
}

/// Copy a 3-channel buffer into an [`RgbImage`].
pub fn to_rgb_image(image: &ArrayView3<'_, u8>) -> Result<RgbImage, ImagingError> {
    ensure_channels(image, RGB_CHANNELS)?;
    let (width, height) = dimensions(image);
    let too_large = || ImagingError::TooLarge { width, height };
    let w = u32::try_from(width).map_err(|_| too_large())?;
    let h = u32::try_from(height).map_err(|_| too_large())?;

    // `iter` walks in logical (row-major) order regardless of memory layout
    let raw: Vec<u8> = image.iter().copied().collect();
    RgbImage::from_raw(w, h, raw).ok_or_else(too_large)
}

/// Move an [`RgbImage`] into a `(height, width, 3)` buffer.
pub fn from_rgb_image(image: RgbImage) -> Result<PixelBuffer, ImagingError> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    Ok(Array3::from_shape_vec(
        (height, width, RGB_CHANNELS),
        image.into_raw(),
    )?)
}
