//! High-level image operations.
//!
//! These functions combine [`calculations`](super::calculations) with
//! Lanczos3 resampling from the `image` crate. Every call allocates a fresh
//! output buffer; inputs are only borrowed.

use super::buffer::{
    ImagingError, PixelBuffer, RGB_CHANNELS, dimensions, ensure_channels, from_rgb_image,
    to_rgb_image,
};
use super::calculations::{
    capped_dimensions, center_offset, crop_window, fill_dimensions, fit_dimensions,
};
use super::params::{ResizeMode, ResizeRequest};
use image::imageops::{self, FilterType};
use ndarray::{ArrayView3, s};
use tracing::{debug, info};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, ImagingError>;

/// Default area budget for [`cap_area`]: 2048 × 2048 pixels.
pub const DEFAULT_MAX_PIXELS: u64 = 2048 * 2048;

/// Crop-fill resamples only the visible source window once the covering
/// image would exceed the canvas area by more than this factor.
const CROP_FIRST_RATIO: u64 = 4;

fn validate_target(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ImagingError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn validate_source(image: &ArrayView3<'_, u8>) -> Result<(u32, u32)> {
    ensure_channels(image, RGB_CHANNELS)?;
    let (width, height) = dimensions(image);
    if width == 0 || height == 0 {
        return Err(ImagingError::EmptySource { width, height });
    }
    let too_large = || ImagingError::TooLarge { width, height };
    Ok((
        u32::try_from(width).map_err(|_| too_large())?,
        u32::try_from(height).map_err(|_| too_large())?,
    ))
}

/// Resample a 3-channel image to exactly `width` × `height` with Lanczos3.
///
/// Aspect ratio is ignored. Resampling to the image's own size returns an
/// exact copy.
pub fn resample(image: &PixelBuffer, width: u32, height: u32) -> Result<PixelBuffer> {
    validate_target(width, height)?;
    let view = image.view();
    let source = validate_source(&view)?;
    resample_view(&view, source, (width, height))
}

fn resample_view(
    image: &ArrayView3<'_, u8>,
    source: (u32, u32),
    target: (u32, u32),
) -> Result<PixelBuffer> {
    if source == target {
        return Ok(image.to_owned());
    }
    let rgb = to_rgb_image(image)?;
    let resized = imageops::resize(&rgb, target.0, target.1, FilterType::Lanczos3);
    from_rgb_image(resized)
}

/// Resize a 3-channel image to exactly `width` × `height` under `mode`.
///
/// - [`ResizeMode::Stretch`]: one resample to the target size.
/// - [`ResizeMode::CropFill`]: scale to cover, center, crop the overflow.
///   When the covering image would be far larger than the canvas (e.g. a
///   1x1000 strip into 1000x1000), only the visible source window is
///   resampled, so memory stays proportional to the canvas.
/// - [`ResizeMode::FitExtend`]: scale to fit, center, then stretch the
///   outermost row/column of the scaled image across each empty margin.
///
/// The output always has shape `(height, width, 3)`.
pub fn resize_image(
    image: &PixelBuffer,
    width: u32,
    height: u32,
    mode: ResizeMode,
) -> Result<PixelBuffer> {
    validate_target(width, height)?;
    let view = image.view();
    let source = validate_source(&view)?;
    let target = (width, height);

    match mode {
        ResizeMode::Stretch => {
            debug!(?source, ?target, "stretch resize");
            resample_view(&view, source, target)
        }
        ResizeMode::CropFill => {
            let scaled_dims = fill_dimensions(source, target);
            debug!(?source, ?target, ?scaled_dims, "crop-fill resize");
            if area(scaled_dims) > CROP_FIRST_RATIO * area(target) {
                let (x, y, w, h) = crop_window(source, scaled_dims, target);
                debug!(x, y, w, h, "crop-fill resampling visible window only");
                let (x, y) = (x as usize, y as usize);
                let window = view.slice(s![y..y + h as usize, x..x + w as usize, ..]);
                return resample_view(&window, (w, h), target);
            }
            let scaled = resample_view(&view, source, scaled_dims)?;
            let mut canvas = PixelBuffer::zeros((height as usize, width as usize, RGB_CHANNELS));
            paste(&mut canvas, &scaled.view(), center_offset(target, scaled_dims));
            Ok(canvas)
        }
        ResizeMode::FitExtend => {
            let scaled_dims = fit_dimensions(source, target);
            debug!(?source, ?target, ?scaled_dims, "fit-extend resize");
            let scaled = resample_view(&view, source, scaled_dims)?;
            let mut canvas = PixelBuffer::zeros((height as usize, width as usize, RGB_CHANNELS));
            let offset = center_offset(target, scaled_dims);
            paste(&mut canvas, &scaled.view(), offset);
            extend_edges(&mut canvas, &scaled.view(), offset);
            Ok(canvas)
        }
    }
}

fn area((width, height): (u32, u32)) -> u64 {
    width as u64 * height as u64
}

/// Resize according to a [`ResizeRequest`].
pub fn resize_to(image: &PixelBuffer, request: &ResizeRequest) -> Result<PixelBuffer> {
    resize_image(image, request.width, request.height, request.mode)
}

/// Paste `src` onto `canvas` with its top-left corner at `offset` (x, y),
/// clipping whatever falls outside the canvas.
fn paste(canvas: &mut PixelBuffer, src: &ArrayView3<'_, u8>, offset: (i64, i64)) {
    let (canvas_h, canvas_w, _) = canvas.dim();
    let (src_h, src_w, _) = src.dim();

    let Some((dst_x, src_x, span_w)) = overlap(offset.0, src_w, canvas_w) else {
        return;
    };
    let Some((dst_y, src_y, span_h)) = overlap(offset.1, src_h, canvas_h) else {
        return;
    };

    canvas
        .slice_mut(s![dst_y..dst_y + span_h, dst_x..dst_x + span_w, ..])
        .assign(&src.slice(s![src_y..src_y + span_h, src_x..src_x + span_w, ..]));
}

/// Overlap of a span of `len` starting at `offset` with `[0, bound)`, as
/// `(destination start, source start, length)`.
fn overlap(offset: i64, len: usize, bound: usize) -> Option<(usize, usize, usize)> {
    let dst_start = offset.max(0);
    let src_start = (-offset).max(0);
    let span = (len as i64 - src_start).min(bound as i64 - dst_start);
    if span <= 0 {
        return None;
    }
    Some((dst_start as usize, src_start as usize, span as usize))
}

/// Fill the margins around a centered `scaled` image by stretching its
/// outermost 1-pixel strip across each margin.
///
/// Each side is filled independently when its margin is non-empty. A margin
/// strip always spans the full canvas width (top/bottom) or height
/// (left/right) because fit-extend matches the other axis exactly.
fn extend_edges(canvas: &mut PixelBuffer, scaled: &ArrayView3<'_, u8>, offset: (i64, i64)) {
    let (canvas_h, canvas_w, _) = canvas.dim();
    let (scaled_h, scaled_w, _) = scaled.dim();
    let (left, top) = (offset.0.max(0) as usize, offset.1.max(0) as usize);
    let bottom = (top + scaled_h).min(canvas_h);
    let right = (left + scaled_w).min(canvas_w);

    if scaled_w == canvas_w {
        if top > 0 {
            let edge = scaled.slice(s![0..1, .., ..]);
            canvas.slice_mut(s![0..top, .., ..]).assign(&edge);
        }
        if bottom < canvas_h {
            let edge = scaled.slice(s![scaled_h - 1..scaled_h, .., ..]);
            canvas.slice_mut(s![bottom..canvas_h, .., ..]).assign(&edge);
        }
    }

    if scaled_h == canvas_h {
        if left > 0 {
            let edge = scaled.slice(s![.., 0..1, ..]);
            canvas.slice_mut(s![.., 0..left, ..]).assign(&edge);
        }
        if right < canvas_w {
            let edge = scaled.slice(s![.., scaled_w - 1..scaled_w, ..]);
            canvas.slice_mut(s![.., right..canvas_w, ..]).assign(&edge);
        }
    }
}

/// Downscale `image` so that `height * width <= max_pixels`.
///
/// Images already within budget come back as an identical copy; nothing is
/// ever upscaled. The new size truncates each axis independently and is
/// produced with a stretch resize. A budget of 0 is rejected since no image
/// of at least 1x1 fits it.
pub fn cap_area(image: &PixelBuffer, max_pixels: u64) -> Result<PixelBuffer> {
    if max_pixels == 0 {
        return Err(ImagingError::ZeroBudget);
    }
    let view = image.view();
    let source = validate_source(&view)?;

    match capped_dimensions(source, max_pixels) {
        None => Ok(image.clone()),
        Some(capped) => {
            info!(
                "Image is too large - resizing from {}x{} to {}x{}",
                source.0, source.1, capped.0, capped.1
            );
            resample_view(&view, source, capped)
        }
    }
}
