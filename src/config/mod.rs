//! Configuration file support for drawboard.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/drawboard/config.toml`. Settings include the default shape
//! style, text and eraser options, canvas surface, scene export and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ColorSpec, CompressionMode};
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{CanvasConfig, EraserConfig, ExportConfig, StyleConfig, TextConfig};

use crate::draw::{Color, FontDescriptor, ShapeStyle, TextOptions};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [style]
/// stroke = "#ff0000"
/// stroke_width = 5.0
/// fill = "transparent"
///
/// [text]
/// font_size = 18.0
///
/// [canvas]
/// background = "white"
/// initial_tool = "free-hand"
///
/// [export]
/// compress = "auto"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Default style of new shapes
    #[serde(default)]
    pub style: StyleConfig,

    /// Text box defaults
    #[serde(default)]
    pub text: TextConfig,

    /// Eraser brush settings
    #[serde(default)]
    pub eraser: EraserConfig,

    /// Canvas surface and viewport settings
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Scene export/import settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `style.stroke_width`: 1.0 - 50.0
    /// - `style.opacity`: 0.0 - 1.0
    /// - `text.font_size`: 8.0 - 72.0
    /// - `text.padding`: 0.0 - 50.0
    /// - `eraser.width`: 1.0 - 100.0
    /// - `canvas.zoom_step`: 1.01 - 4.0
    /// - `canvas.width` / `canvas.height`: 1 - 16384
    pub fn validate_and_clamp(&mut self) {
        self.style.stroke_width = clamp_stroke_width(self.style.stroke_width);
        self.style.opacity = clamp_opacity(self.style.opacity);
        clamp_f64("text.font_size", &mut self.text.font_size, 8.0, 72.0);
        clamp_f64("text.padding", &mut self.text.padding, 0.0, 50.0);
        clamp_f64("eraser.width", &mut self.eraser.width, 1.0, 100.0);
        clamp_f64("canvas.zoom_step", &mut self.canvas.zoom_step, 1.01, 4.0);

        for (name, value) in [
            ("canvas.width", &mut self.canvas.width),
            ("canvas.height", &mut self.canvas.height),
        ] {
            if !(1..=16384).contains(value) {
                warn!("Invalid {name} {value}, clamping to 1-16384 range");
                *value = (*value).clamp(1, 16384);
            }
        }

        // Validate font weight is reasonable
        let valid_weight = matches!(
            self.text.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .text
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                self.text.font_weight
            );
            self.text.font_weight = "normal".to_string();
        }

        // Validate font style
        if !matches!(
            self.text.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.text.font_style
            );
            self.text.font_style = "normal".to_string();
        }

        if self.export.max_file_size_mb == 0 {
            warn!("export.max_file_size_mb must be positive, using 1");
            self.export.max_file_size_mb = 1;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/drawboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("drawboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// defines conflicting keybindings.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();
        config
            .keybindings
            .build_action_map()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid keybindings in {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Default style for new shapes.
    pub fn shape_style(&self) -> ShapeStyle {
        ShapeStyle {
            stroke: self.style.stroke.to_color(),
            stroke_width: self.style.stroke_width,
            fill: self.style.fill.to_color(),
            opacity: self.style.opacity,
            erasable: self.style.erasable,
        }
    }

    /// Options for new text boxes.
    pub fn text_options(&self) -> TextOptions {
        TextOptions {
            font_size: self.text.font_size,
            padding: self.text.padding,
            font: FontDescriptor::new(
                self.text.font_family.clone(),
                self.text.font_weight.clone(),
                self.text.font_style.clone(),
            ),
        }
    }

    pub fn background(&self) -> Color {
        self.canvas.background.to_color()
    }
}

/// Clamps a stroke width to 1.0 - 50.0, logging a warning when it was out of range.
pub(crate) fn clamp_stroke_width(mut width: f64) -> f64 {
    clamp_f64("style.stroke_width", &mut width, 1.0, 50.0);
    width
}

/// Clamps an opacity to 0.0 - 1.0, logging a warning when it was out of range.
pub(crate) fn clamp_opacity(mut opacity: f64) -> f64 {
    clamp_f64("style.opacity", &mut opacity, 0.0, 1.0);
    opacity
}

fn clamp_f64(name: &str, value: &mut f64, min: f64, max: f64) {
    if !(min..=max).contains(value) {
        warn!("Invalid {name} {value:.2}, clamping to {min}-{max} range");
        *value = if value.is_nan() { min } else { value.clamp(min, max) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{RED, TRANSPARENT, WHITE};
    use crate::input::Tool;

    #[test]
    fn defaults_match_board_defaults() {
        let config = Config::default();
        let style = config.shape_style();
        assert_eq!(style, ShapeStyle::default());
        assert_eq!(style.stroke, RED);
        assert_eq!(style.fill, TRANSPARENT);
        assert_eq!(config.background(), WHITE);
        assert_eq!(config.canvas.initial_tool, Tool::FreeHand);
        assert_eq!(config.text_options(), TextOptions::default());
        assert_eq!(config.eraser.width, 10.0);
    }

    #[test]
    fn parses_partial_toml() {
        let config: Config = toml::from_str(
            r##"
            [style]
            stroke = [0, 0, 255]
            fill = "#00ff0080"

            [canvas]
            initial_tool = "arrow"

            [export]
            compress = "on"

            [keybindings]
            copy = ["Ctrl+Shift+C"]
            "##,
        )
        .unwrap();

        assert_eq!(config.shape_style().stroke.b, 1.0);
        assert!((config.shape_style().fill.a - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(config.canvas.initial_tool, Tool::Arrow);
        assert_eq!(config.export.compress, CompressionMode::On);
        assert_eq!(config.keybindings.copy, vec!["Ctrl+Shift+C".to_string()]);
        assert_eq!(config.keybindings.paste, vec!["Ctrl+V".to_string()]);
    }

    #[test]
    fn validate_clamps_out_of_range_values() {
        let mut config = Config::default();
        config.style.stroke_width = 500.0;
        config.style.opacity = -1.0;
        config.canvas.zoom_step = 1.0;
        config.canvas.width = 0;
        config.text.font_style = "wobbly".to_string();
        config.validate_and_clamp();

        assert_eq!(config.style.stroke_width, 50.0);
        assert_eq!(config.style.opacity, 0.0);
        assert_eq!(config.canvas.zoom_step, 1.01);
        assert_eq!(config.canvas.width, 1);
        assert_eq!(config.text.font_style, "normal");
    }

    #[test]
    fn load_from_rejects_duplicate_bindings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[keybindings]\ncopy = [\"Ctrl+X\"]\npaste = [\"Ctrl+X\"]\n",
        )
        .unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Duplicate keybinding"));
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema.get("properties").unwrap();
        for section in ["style", "text", "eraser", "canvas", "export", "keybindings"] {
            assert!(properties.get(section).is_some(), "missing {section}");
        }
    }
}
