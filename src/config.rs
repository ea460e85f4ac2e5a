//! Configuration module.
//!
//! Handles loading, validating, and merging `genprep.toml`. Values that used
//! to be baked into function signatures (the output folder, the filename
//! extension, the pixel budget) live here and are passed explicitly to the
//! functions that need them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! dir = "outputs"           # Folder for generated filenames
//! extension = "png"         # Extension for generated filenames (no dot)
//!
//! [resize]
//! mode = "crop-fill"        # stretch | crop-fill | fit-extend
//! max_pixels = 4194304      # Size-guard budget (2048 * 2048)
//!
//! [listing]
//! extensions = [".png", ".jpg", ".jpeg", ".webp"]
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::imaging::{DEFAULT_MAX_PIXELS, ResizeMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE: &str = "genprep.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `genprep.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where generated files go and how they are named.
    pub output: OutputConfig,
    /// Default resize mode and size-guard budget.
    pub resize: ResizeConfig,
    /// Default filters for folder listings.
    pub listing: ListingConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ext = &self.output.extension;
        if ext.is_empty() || ext.starts_with('.') {
            return Err(ConfigError::Validation(
                "output.extension must be non-empty and have no leading dot".into(),
            ));
        }
        if self.resize.max_pixels == 0 {
            return Err(ConfigError::Validation(
                "resize.max_pixels must be positive".into(),
            ));
        }
        if let Some(bad) = self
            .listing
            .extensions
            .iter()
            .find(|e| !e.starts_with('.') || e.len() < 2)
        {
            return Err(ConfigError::Validation(format!(
                "listing.extensions entries must look like \".png\", got {bad:?}"
            )));
        }
        Ok(())
    }
}

/// Output naming settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Root folder for generated files; a dated subfolder is added per day.
    pub dir: PathBuf,
    /// Extension for generated file names, without the dot.
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("outputs"),
            extension: "png".to_string(),
        }
    }
}

/// Resize defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    pub mode: ResizeMode,
    /// Largest allowed `width * height` before the size guard downscales.
    pub max_pixels: u64,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            mode: ResizeMode::default(),
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

/// Folder listing defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    /// Dot-prefixed extensions kept by `genprep list` when none are given.
    pub extensions: Vec<String>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            extensions: [".png", ".jpg", ".jpeg", ".webp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(Config::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `genprep.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist, `Err` if it is invalid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<Config, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `genprep.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `genprep.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# genprep configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Generated output files
# ---------------------------------------------------------------------------
[output]
# Root folder; files land in <dir>/YYYY-MM-DD/YYYY-MM-DD_HH-MM-SS_NNNN.<ext>
dir = "outputs"

# Extension for generated file names, without the leading dot.
extension = "png"

# ---------------------------------------------------------------------------
# Resizing
# ---------------------------------------------------------------------------
[resize]
# How aspect-ratio mismatch is resolved:
#   stretch    - scale to the exact size, ignoring aspect ratio
#   crop-fill  - cover the target, center-crop the overflow
#   fit-extend - fit inside the target, extend edge pixels into the margins
mode = "crop-fill"

# Images larger than this many pixels (width * height) are downscaled.
max_pixels = 4194304

# ---------------------------------------------------------------------------
# Folder listing
# ---------------------------------------------------------------------------
[listing]
# Extensions kept by `genprep list` when no --ext is given (case-insensitive).
extensions = [".png", ".jpg", ".jpeg", ".webp"]
"##
}
