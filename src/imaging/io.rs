//! Loading and saving pixel buffers through the `image` crate decoders.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` |
//! | Encode | `image::RgbImage::save` (format from extension) |
//!
//! Decoded images keep their channel count (gray → 1, RGB → 3, RGBA → 4)
//! so [`normalize_channels`](super::normalize_channels) sees what the file
//! actually holds. Layouts the normalizer does not accept (16-bit, gray +
//! alpha, float) are converted to RGBA8 first.

use super::buffer::{ImagingError, PixelBuffer, to_rgb_image};
use image::{DynamicImage, ImageFormat, ImageReader};
use ndarray::Array3;
use std::path::Path;
use std::sync::LazyLock;

const INPUT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    INPUT_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Decode an image file into a `(height, width, channels)` buffer.
pub fn load_image(path: &Path) -> Result<PixelBuffer, ImagingError> {
    let load_error = |source| ImagingError::ImageLoad {
        path: path.to_path_buf(),
        source,
    };
    let img = ImageReader::open(path)
        .map_err(|e| load_error(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| load_error(image::ImageError::IoError(e)))?
        .decode()
        .map_err(load_error)?;
    dynamic_to_buffer(img)
}

fn dynamic_to_buffer(img: DynamicImage) -> Result<PixelBuffer, ImagingError> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let (channels, raw) = match img {
        DynamicImage::ImageLuma8(gray) => (1, gray.into_raw()),
        DynamicImage::ImageRgb8(rgb) => (3, rgb.into_raw()),
        DynamicImage::ImageRgba8(rgba) => (4, rgba.into_raw()),
        other => (4, other.to_rgba8().into_raw()),
    };
    Ok(Array3::from_shape_vec((height, width, channels), raw)?)
}

/// Save a 3-channel buffer; the format is inferred from the extension.
pub fn save_image(image: &PixelBuffer, path: &Path) -> Result<(), ImagingError> {
    let rgb = to_rgb_image(&image.view())?;
    rgb.save(path).map_err(|source| ImagingError::ImageSave {
        path: path.to_path_buf(),
        source,
    })
}
