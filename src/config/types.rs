//! Configuration type definitions.

use super::enums::{ColorSpec, CompressionMode};
use crate::input::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default style for new shapes.
///
/// Every shape factory receives a copy of this style merged with any
/// per-call overrides.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StyleConfig {
    /// Outline color
    #[serde(default = "default_stroke")]
    pub stroke: ColorSpec,

    /// Outline width (valid range: 1.0 - 50.0)
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// Interior color ("transparent" for outlines only)
    #[serde(default = "default_fill")]
    pub fill: ColorSpec,

    /// Opacity multiplier (valid range: 0.0 - 1.0)
    #[serde(default = "default_opacity")]
    pub opacity: f64,

    /// Whether the eraser may remove new shapes
    #[serde(default = "default_erasable")]
    pub erasable: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke: default_stroke(),
            stroke_width: default_stroke_width(),
            fill: default_fill(),
            opacity: default_opacity(),
            erasable: default_erasable(),
        }
    }
}

/// Text box settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TextConfig {
    /// Font size in canvas units (valid range: 8.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Padding between text and its editing border
    #[serde(default = "default_padding")]
    pub padding: f64,

    /// Font family name for text rendering (e.g., "Sans", "Monospace")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", or 100-900)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            padding: default_padding(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
        }
    }
}

/// Eraser brush settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EraserConfig {
    /// Eraser width (valid range: 1.0 - 100.0)
    #[serde(default = "default_eraser_width")]
    pub width: f64,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            width: default_eraser_width(),
        }
    }
}

/// Canvas surface settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Surface width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Surface height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Background color
    #[serde(default = "default_background")]
    pub background: ColorSpec,

    /// Tool selected at startup (e.g. "free-hand", "rectangle", "select")
    #[serde(default)]
    #[schemars(with = "String")]
    pub initial_tool: Tool,

    /// Zoom factor per zoom in/out step (valid range: 1.01 - 4.0)
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
            initial_tool: Tool::default(),
            zoom_step: default_zoom_step(),
        }
    }
}

/// Scene export settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Compression mode: "auto", "on" or "off"
    #[serde(default)]
    pub compress: CompressionMode,

    /// JSON size above which "auto" compresses, in kilobytes
    #[serde(default = "default_auto_compress_threshold_kb")]
    pub auto_compress_threshold_kb: u64,

    /// Largest scene file accepted on load, in megabytes
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            compress: CompressionMode::default(),
            auto_compress_threshold_kb: default_auto_compress_threshold_kb(),
            max_file_size_mb: default_max_file_size_mb(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_stroke() -> ColorSpec {
    ColorSpec::Name("#ff0000".to_string())
}

fn default_stroke_width() -> f64 {
    5.0
}

fn default_fill() -> ColorSpec {
    ColorSpec::Name("transparent".to_string())
}

fn default_opacity() -> f64 {
    1.0
}

fn default_erasable() -> bool {
    true
}

fn default_font_size() -> f64 {
    18.0
}

fn default_padding() -> f64 {
    5.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_eraser_width() -> f64 {
    10.0
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_zoom_step() -> f64 {
    1.1
}

fn default_auto_compress_threshold_kb() -> u64 {
    100
}

fn default_max_file_size_mb() -> u64 {
    10
}
