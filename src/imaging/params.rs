//! Parameter types for image operations.
//!
//! These types describe *what* to do, not *how* to do it. They are the
//! interface between callers (the CLI, config, an external pipeline) and
//! [`operations`](super::operations), which does the pixel work.
//!
//! ## Types
//!
//! - [`ResizeMode`]: How aspect-ratio mismatch is resolved: stretch, crop-fill or fit-extend.
//! - [`ResizeRequest`]: Target width, height and mode for a single resize.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a resize resolves the aspect-ratio mismatch between source and target.
///
/// The numeric codes (`0`, `1`, `2`) are the ones image pipelines pass around;
/// see [`ResizeMode::code`] and the `TryFrom<u8>` impl.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeMode {
    /// Scale to exactly the target size, ignoring aspect ratio.
    Stretch,
    /// Keep aspect ratio, cover the target box, center-crop the overflow.
    #[default]
    CropFill,
    /// Keep aspect ratio, fit inside the target box, extend edge pixels into
    /// the margins.
    FitExtend,
}

impl ResizeMode {
    pub fn code(self) -> u8 {
        match self {
            ResizeMode::Stretch => 0,
            ResizeMode::CropFill => 1,
            ResizeMode::FitExtend => 2,
        }
    }
}

impl TryFrom<u8> for ResizeMode {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ResizeMode::Stretch),
            1 => Ok(ResizeMode::CropFill),
            2 => Ok(ResizeMode::FitExtend),
            other => Err(other),
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResizeMode::Stretch => "stretch",
            ResizeMode::CropFill => "crop-fill",
            ResizeMode::FitExtend => "fit-extend",
        };
        f.write_str(name)
    }
}

/// Parameters for a single resize: target dimensions plus mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeRequest {
    pub width: u32,
    pub height: u32,
    pub mode: ResizeMode,
}

impl ResizeRequest {
    pub fn new(width: u32, height: u32, mode: ResizeMode) -> Self {
        Self {
            width,
            height,
            mode,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_crop_fill() {
        assert_eq!(ResizeMode::default(), ResizeMode::CropFill);
    }

    #[test]
    fn codes_map_both_ways() {
        for mode in [
            ResizeMode::Stretch,
            ResizeMode::CropFill,
            ResizeMode::FitExtend,
        ] {
            assert_eq!(ResizeMode::try_from(mode.code()), Ok(mode));
        }
        assert_eq!(ResizeMode::try_from(7), Err(7));
    }

    #[test]
    fn display_matches_serde_names() {
        let json = serde_json::to_string(&ResizeMode::FitExtend).unwrap();
        assert_eq!(json, format!("\"{}\"", ResizeMode::FitExtend));
    }

    #[test]
    fn request_dimensions() {
        let request = ResizeRequest::new(1152, 896, ResizeMode::Stretch);
        assert_eq!(request.dimensions(), (1152, 896));
    }
}
