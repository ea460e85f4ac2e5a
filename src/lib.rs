//! # genprep
//!
//! Image preprocessing helpers for generative-image pipelines: resize inputs
//! to an exact canvas, keep them under a pixel budget, coerce any channel
//! layout to RGB, list input folders, and name outputs by date.
//!
//! Pixel data is an `ndarray` [`Array3<u8>`](ndarray::Array3) of shape
//! `(height, width, channels)`, the layout image-model code already passes
//! around. The `image` crate is only used at the edges: decoding, encoding,
//! and Lanczos3 resampling.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Resize modes, channel normalization, size guard, file I/O |
//! | [`scan`] | Recursive folder listing with extension and name filters |
//! | [`naming`] | Date-partitioned output file names |
//! | [`prompts`] | Prompt fragment helpers (drop empties, comma-join) |
//! | [`config`] | `genprep.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Three Resize Modes, One Shape Contract
//!
//! [`imaging::resize_image`] always returns exactly `(height, width, 3)`,
//! whatever the mode. The modes only differ in how aspect-ratio mismatch is
//! resolved:
//!
//! ```text
//! stretch     distort to fit
//! crop-fill   scale to cover, center, crop the overflow
//! fit-extend  scale to fit, center, smear edge pixels into the margins
//! ```
//!
//! Fit-extend exists because a flat color border is a strong signal to a
//! diffusion model; repeating the outermost row or column keeps the margin
//! visually continuous with the image.
//!
//! ## Exact Ratio Comparison
//!
//! Mode decisions compare `target_w * source_h` with `source_w * target_h`
//! in integer arithmetic, so images whose ratios match exactly are never
//! sent down the crop or extend path due to float rounding.
//!
//! ## Explicit Defaults
//!
//! Nothing reads global state. The output folder, extension, and pixel
//! budget come from [`config::Config`] and are passed to each function.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod prompts;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
