//! Channel normalization: grayscale and RGBA buffers to plain RGB.
//!
//! | Input | Output |
//! |---|---|
//! | `(h, w)` | grayscale replicated to 3 channels |
//! | `(h, w, 1)` | grayscale replicated to 3 channels |
//! | `(h, w, 3)` | copied unchanged |
//! | `(h, w, 4)` | alpha-composited over white |
//!
//! Every other shape is rejected.

use super::buffer::{ImagingError, PixelBuffer, RGB_CHANNELS};
use ndarray::{ArrayView3, ArrayViewD, Axis, Ix3, Zip, s};

/// Convert a 1-, 3- or 4-channel image (or a bare 2-D grayscale array) to
/// a 3-channel image of the same height and width.
pub fn normalize_channels(image: ArrayViewD<'_, u8>) -> Result<PixelBuffer, ImagingError> {
    let image = match image.ndim() {
        2 => image.insert_axis(Axis(2)),
        3 => image,
        _ => return Err(ImagingError::UnsupportedShape(image.shape().to_vec())),
    };
    let image = image
        .into_dimensionality::<Ix3>()
        .map_err(ImagingError::Shape)?;

    match image.dim().2 {
        1 => Ok(replicate_gray(image)),
        3 => Ok(image.to_owned()),
        4 => Ok(composite_over_white(image)),
        other => Err(ImagingError::UnsupportedChannels(other)),
    }
}

fn replicate_gray(image: ArrayView3<'_, u8>) -> PixelBuffer {
    let (height, width, _) = image.dim();
    let mut out = PixelBuffer::zeros((height, width, RGB_CHANNELS));
    // (h, w, 1) broadcasts across the channel axis
    out.assign(&image);
    out
}

/// `color * alpha + 255 * (1 - alpha)`, alpha normalized to `[0, 1]`.
fn composite_over_white(image: ArrayView3<'_, u8>) -> PixelBuffer {
    let (height, width, _) = image.dim();
    let mut out = PixelBuffer::zeros((height, width, RGB_CHANNELS));
    let color = image.slice(s![.., .., 0..RGB_CHANNELS]);
    let alpha = image.slice(s![.., .., RGB_CHANNELS..]);

    Zip::from(&mut out)
        .and(&color)
        .and_broadcast(&alpha)
        .for_each(|out, &c, &a| {
            let a = a as f32 / 255.0;
            let blended = c as f32 * a + 255.0 * (1.0 - a);
            *out = blended.clamp(0.0, 255.0) as u8;
        });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::gradient;
    use ndarray::{Array2, Array3, IxDyn, concatenate};

    fn with_alpha(rgb: &PixelBuffer, alpha: u8) -> Array3<u8> {
        let (h, w, _) = rgb.dim();
        let alpha = Array3::from_elem((h, w, 1), alpha);
        concatenate(Axis(2), &[rgb.view(), alpha.view()]).unwrap()
    }

    #[test]
    fn two_dimensional_gray_is_replicated() {
        let gray = Array2::from_shape_fn((3, 4), |(y, x)| (y * 10 + x) as u8);
        let out = normalize_channels(gray.view().into_dyn()).unwrap();

        assert_eq!(out.dim(), (3, 4, 3));
        for c in 0..3 {
            assert_eq!(out[[2, 1, c]], 21);
        }
    }

    #[test]
    fn single_channel_is_replicated() {
        let gray = Array3::from_shape_fn((2, 2, 1), |(y, x, _)| (y * 2 + x) as u8 * 50);
        let out = normalize_channels(gray.view().into_dyn()).unwrap();
        assert_eq!(out.dim(), (2, 2, 3));
        assert_eq!(out[[1, 1, 0]], 150);
        assert_eq!(out[[1, 1, 2]], 150);
    }

    #[test]
    fn rgb_passes_through() {
        let rgb = gradient(5, 3);
        let out = normalize_channels(rgb.view().into_dyn()).unwrap();
        assert_eq!(out, rgb);
    }

    #[test]
    fn opaque_alpha_equals_rgb_slice() {
        let rgb = gradient(6, 4);
        let rgba = with_alpha(&rgb, 255);
        let out = normalize_channels(rgba.view().into_dyn()).unwrap();
        assert_eq!(out, rgb);
    }

    #[test]
    fn transparent_alpha_is_white() {
        let rgba = with_alpha(&gradient(6, 4), 0);
        let out = normalize_channels(rgba.view().into_dyn()).unwrap();
        assert!(out.iter().all(|&v| v == 255));
    }

    #[test]
    fn half_alpha_lands_between_color_and_white() {
        let black = PixelBuffer::zeros((1, 1, 3));
        let rgba = with_alpha(&black, 128);
        let out = normalize_channels(rgba.view().into_dyn()).unwrap();
        assert!((126..=127).contains(&out[[0, 0, 0]]));
    }

    #[test]
    fn two_channels_rejected() {
        let la = Array3::<u8>::zeros((2, 2, 2));
        assert!(matches!(
            normalize_channels(la.view().into_dyn()),
            Err(ImagingError::UnsupportedChannels(2))
        ));
    }

    #[test]
    fn wrong_dimensionality_rejected() {
        let flat = ndarray::ArrayD::<u8>::zeros(IxDyn(&[16]));
        assert!(matches!(
            normalize_channels(flat.view()),
            Err(ImagingError::UnsupportedShape(shape)) if shape == vec![16]
        ));

        let batch = ndarray::ArrayD::<u8>::zeros(IxDyn(&[1, 2, 2, 3]));
        assert!(normalize_channels(batch.view()).is_err());
    }
}
