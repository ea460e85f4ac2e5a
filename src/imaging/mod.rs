//! Image preprocessing on `ndarray` pixel buffers, resampled with the `image` crate.
//!
//! | Operation | Function |
//! |---|---|
//! | **Resize** (stretch / crop-fill / fit-extend) | [`resize_image`] |
//! | **Plain resample** | [`resample`] (Lanczos3) |
//! | **Channel normalization** | [`normalize_channels`] |
//! | **Size guard** | [`cap_area`] |
//! | **Canvas check** | [`covers_canvas`] |
//! | **File I/O** | [`load_image`], [`save_image`] |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing a resize
//! - **Buffer**: [`PixelBuffer`], [`ImagingError`], `image` crate conversions
//! - **Operations**: High-level functions combining calculations + resampling

mod buffer;
mod calculations;
mod channels;
pub mod io;
pub mod operations;
mod params;

pub use buffer::{ImagingError, PixelBuffer, RGB_CHANNELS};
pub use calculations::covers_canvas;
pub use channels::normalize_channels;
pub use io::{load_image, save_image, supported_input_extensions};
pub use operations::{DEFAULT_MAX_PIXELS, cap_area, resample, resize_image, resize_to};
pub use params::{ResizeMode, ResizeRequest};
