//! Shared test utilities for the genprep test suite.
//!
//! Provides synthetic pixel buffers with known contents and a helper for
//! laying out throwaway directory trees.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let img = gradient(64, 48);
//! assert_eq!(img.dim(), (48, 64, 3));
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! write_tree(tmp.path(), &["a.png", "refs/pose.jpg"]);
//! ```

use ndarray::Array3;
use std::path::Path;

use crate::imaging::PixelBuffer;

// =========================================================================
// Pixel buffers
// =========================================================================

/// RGB buffer of `width` x `height` where every pixel differs from its
/// neighbours in every channel.
pub fn gradient(width: usize, height: usize) -> PixelBuffer {
    Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
        ((x * 7 + y * 13 + c * 50) % 256) as u8
    })
}

/// RGB buffer of `width` x `height` filled with one color.
pub fn solid(width: usize, height: usize, rgb: [u8; 3]) -> PixelBuffer {
    Array3::from_shape_fn((height, width, 3), |(_, _, c)| rgb[c])
}

// =========================================================================
// Filesystem
// =========================================================================

/// Create each relative path under `root` as a small file, making parent
/// directories as needed.
pub fn write_tree(root: &Path, files: &[&str]) {
    for file in files {
        let path = root.join(file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, b"x").unwrap();
    }
}
