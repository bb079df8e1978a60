//! Shape style attributes and per-call overrides.

use super::color::{Color, RED, TRANSPARENT};
use serde::{Deserialize, Serialize};

/// Style applied to a shape at creation time.
///
/// Passed by value into every shape factory; a created shape owns its copy and
/// only changes it through explicit setters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Outline color
    pub stroke: Color,
    /// Outline width in canvas units
    pub stroke_width: f64,
    /// Interior color (transparent draws no fill)
    pub fill: Color,
    /// Overall opacity multiplier (0.0 - 1.0)
    pub opacity: f64,
    /// Whether the eraser brush may remove the shape
    pub erasable: bool,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke: RED,
            stroke_width: 5.0,
            fill: TRANSPARENT,
            opacity: 1.0,
            erasable: true,
        }
    }
}

/// Optional replacements for individual [`ShapeStyle`] fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleOverrides {
    #[serde(default)]
    pub stroke: Option<Color>,
    #[serde(default)]
    pub stroke_width: Option<f64>,
    #[serde(default)]
    pub fill: Option<Color>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub erasable: Option<bool>,
}

impl ShapeStyle {
    /// Returns a new style where every field present in `overrides` wins.
    pub fn merged(self, overrides: &StyleOverrides) -> ShapeStyle {
        ShapeStyle {
            stroke: overrides.stroke.unwrap_or(self.stroke),
            stroke_width: overrides.stroke_width.unwrap_or(self.stroke_width),
            fill: overrides.fill.unwrap_or(self.fill),
            opacity: overrides.opacity.unwrap_or(self.opacity),
            erasable: overrides.erasable.unwrap_or(self.erasable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, GREEN};

    #[test]
    fn merged_keeps_unset_fields() {
        let base = ShapeStyle::default();
        let merged = base.merged(&StyleOverrides {
            stroke: Some(BLUE),
            opacity: Some(0.5),
            ..StyleOverrides::default()
        });

        assert_eq!(merged.stroke, BLUE);
        assert_eq!(merged.opacity, 0.5);
        assert_eq!(merged.stroke_width, 5.0);
        assert_eq!(merged.fill, TRANSPARENT);
        assert!(merged.erasable);
    }

    #[test]
    fn merged_does_not_touch_the_receiver() {
        let base = ShapeStyle::default();
        let _ = base.merged(&StyleOverrides {
            fill: Some(GREEN),
            erasable: Some(false),
            ..StyleOverrides::default()
        });
        assert_eq!(base, ShapeStyle::default());
    }
}
