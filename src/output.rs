//! CLI output formatting for every `genprep` command.
//!
//! # Output Format
//!
//! ## Resize / Cap
//!
//! ```text
//! crop-fill 1024x768 → 512x512
//!     Saved: /work/outputs/2026-10-19/2026-10-19_14-03-52_4821.png
//! ```
//!
//! A source smaller than the canvas gets an extra `Upscaled` context line.
//! `cap` on an image already within budget prints `unchanged` instead of the
//! arrow.
//!
//! ## List
//!
//! ```text
//! inputs/ (3 files)
//!     001 a.png
//!     002 b.jpg
//!     003 refs/pose.png
//! ```
//!
//! With `--json`, a plain array of relative paths.
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::naming::TempFilename;
use std::path::{Path, PathBuf};

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn format_dims((width, height): (u32, u32)) -> String {
    format!("{width}x{height}")
}

// ============================================================================
// Resize / Cap
// ============================================================================

/// What a resize-style command did to one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeReport<'a> {
    /// Short label for the operation, e.g. `"crop-fill"` or `"cap"`.
    pub label: &'a str,
    pub source: (u32, u32),
    pub result: (u32, u32),
    /// Whether the source already covered the target canvas.
    pub covered: bool,
    pub saved_to: &'a Path,
}

/// Format the outcome of `resize` or `cap`.
pub fn format_resize_report(report: &ResizeReport<'_>) -> Vec<String> {
    let header = if report.source == report.result {
        format!("{} {} unchanged", report.label, format_dims(report.source))
    } else {
        format!(
            "{} {} → {}",
            report.label,
            format_dims(report.source),
            format_dims(report.result)
        )
    };

    let mut lines = vec![header];
    if !report.covered {
        lines.push(format!("{}Upscaled: source is smaller than the canvas", indent(1)));
    }
    lines.push(format!("{}Saved: {}", indent(1), report.saved_to.display()));
    lines
}

pub fn print_resize_report(report: &ResizeReport<'_>) {
    for line in format_resize_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// List
// ============================================================================

/// Format a folder listing as an indexed inventory.
pub fn format_listing(folder: &Path, files: &[PathBuf]) -> Vec<String> {
    let noun = if files.len() == 1 { "file" } else { "files" };
    let mut lines = vec![format!(
        "{}/ ({} {})",
        folder.display().to_string().trim_end_matches('/'),
        files.len(),
        noun
    )];
    lines.extend(
        files
            .iter()
            .enumerate()
            .map(|(i, f)| format!("{}{} {}", indent(1), format_index(i + 1), f.display())),
    );
    lines
}

pub fn print_listing(folder: &Path, files: &[PathBuf]) {
    for line in format_listing(folder, files) {
        println!("{}", line);
    }
}

/// Format a folder listing as a pretty JSON array of relative paths.
pub fn format_listing_json(files: &[PathBuf]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(files)
}

// ============================================================================
// Temp names
// ============================================================================

/// Format a generated output path: the absolute path first, then its parts.
pub fn format_temp_name(name: &TempFilename) -> Vec<String> {
    vec![
        name.path.display().to_string(),
        format!("{}Date: {}", indent(1), name.date),
        format!("{}File: {}", indent(1), name.filename),
    ]
}

pub fn print_temp_name(name: &TempFilename) {
    for line in format_temp_name(name) {
        println!("{}", line);
    }
}
