//! Tool configuration.
//!
//! Handles loading, validating, and merging `site-assets.toml`. Values are
//! layered: stock defaults, then the config file, then command-line flags
//! (applied by the CLI on top of the resolved config).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [icons]
//! source = "assets/Icons/favicon.ico"   # Multi-resolution icon source
//! output = "client/public/icons"        # PNG output directory
//! apple_source = "assets/Icons/eatwithmaddie.png"  # Touch-icon source
//!
//! [carousel]
//! input_dir = "assets/Meal Carousel"
//! output_dir = "client/public/images/carousel"
//! widths = [360, 600]       # Output widths, each >= 64
//! quality = 88              # WebP quality (clamped to 1-100)
//! aspect_ratio = [3, 2]     # width:height of every preview
//! background = [26, 12, 12] # Canvas RGB behind letterboxed photos
//! corner_radius = 0.30      # Squircle radius as a fraction of the short edge
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; override just the values you want:
//!
//! ```toml
//! [carousel]
//! quality = 80
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "site-assets.toml";

/// Touch-icon artwork used when the config does not name one.
pub const DEFAULT_APPLE_SOURCE: &str = "assets/Icons/eatwithmaddie.png";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Icon generator settings.
    pub icons: IconsConfig,
    /// Carousel preparer settings.
    pub carousel: CarouselConfig,
}

impl AssetsConfig {
    /// Validate every section.
    ///
    /// Loading does not call this; each pipeline validates the section it
    /// uses, so a broken `[carousel]` table does not block `icons`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.carousel.validate()
    }
}

/// Icon generator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconsConfig {
    /// Primary icon source (`.ico` or any decodable image).
    pub source: PathBuf,
    /// Directory receiving the PNG set.
    pub output: PathBuf,
    /// Alternate source for the touch icon. Falls back to `source` when
    /// absent or missing on disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apple_source: Option<PathBuf>,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("assets/Icons/favicon.ico"),
            output: PathBuf::from("client/public/icons"),
            apple_source: Some(PathBuf::from(DEFAULT_APPLE_SOURCE)),
        }
    }
}

/// Carousel preparer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Directory of source photos (not searched recursively).
    pub input_dir: PathBuf,
    /// Directory receiving the WebP previews. Existing `.webp` files are purged.
    pub output_dir: PathBuf,
    /// Output widths in pixels.
    pub widths: Vec<u32>,
    /// WebP quality, clamped to 1-100 at encode time. Out-of-range values,
    /// negative ones included, are accepted here.
    pub quality: i64,
    /// Preview aspect ratio as `[width, height]`.
    pub aspect_ratio: [u32; 2],
    /// Canvas color behind letterboxed photos.
    pub background: [u8; 3],
    /// Squircle corner radius as a fraction of the shorter canvas edge.
    pub corner_radius: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("assets/Meal Carousel"),
            output_dir: PathBuf::from("client/public/images/carousel"),
            widths: vec![360, 600],
            quality: 88,
            aspect_ratio: [3, 2],
            background: [26, 12, 12],
            corner_radius: 0.30,
        }
    }
}

impl CarouselConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::carousel::normalize_widths(&self.widths)
            .map_err(|e| ConfigError::Validation(format!("carousel.widths: {}", e)))?;
        if self.aspect_ratio[0] == 0 || self.aspect_ratio[1] == 0 {
            return Err(ConfigError::Validation(
                "carousel.aspect_ratio values must be non-zero".into(),
            ));
        }
        if !(0.0..=0.5).contains(&self.corner_radius) {
            return Err(ConfigError::Validation(
                "carousel.corner_radius must be between 0.0 and 0.5".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AssetsConfig::default()).expect("default config must serialize")
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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize.
///
/// Unknown keys and mistyped values fail here. Range checks are left to
/// the section's own `validate`.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AssetsConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AssetsConfig = merged.try_into()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it is absent.
pub fn load_config(path: &Path) -> Result<AssetsConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Load config from a path the user named explicitly; it must exist.
pub fn load_required_config(path: &Path) -> Result<AssetsConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    load_config(path)
}

/// Returns a fully-commented stock `site-assets.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# site-assets configuration
# =========================
# Every key is optional. Command-line flags override values set here.

[icons]
# Multi-resolution icon source. For .ico files the largest entry is used.
source = "assets/Icons/favicon.ico"

# Directory receiving icon-16x16.png ... android-chrome-512x512.png and
# apple-touch-icon.png. Created if missing; existing files are overwritten.
output = "client/public/icons"

# Separate artwork for the 180x180 apple-touch-icon.png. When the file does
# not exist, a warning is printed and the primary source is used instead.
apple_source = "assets/Icons/eatwithmaddie.png"

[carousel]
# Directory of source photos (.jpg, .jpeg, .png, .webp).
input_dir = "assets/Meal Carousel"

# Directory receiving {slug}-{width}x{height}.webp previews.
# Every existing .webp file in it is deleted before regenerating.
output_dir = "client/public/images/carousel"

# Output widths in pixels; each must be at least 64.
widths = [360, 600]

# WebP quality, 1-100.
quality = 88

# Preview aspect ratio as [width, height].
aspect_ratio = [3, 2]

# RGB canvas color visible where a photo does not fill the preview.
background = [26, 12, 12]

# Squircle corner radius as a fraction of the shorter preview edge (0.0-0.5).
corner_radius = 0.30
"##
}
