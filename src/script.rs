//! Replays recorded gesture scripts against an [`InputState`].
//!
//! A script is a JSON array of single-key objects:
//!
//! ```json
//! [
//!   {"tool": "arrow"},
//!   {"style": {"stroke": "blue", "stroke_width": 3}},
//!   {"down": [10, 20]}, {"move": [60, 40]}, {"up": [110, 20]},
//!   {"key": "Ctrl+C"}, {"key": "Ctrl+V"},
//!   {"text": "Hello"}, {"scale": [2, 1]}, {"zoom": 1.5}
//! ]
//! ```
//!
//! Pointer coordinates are screen coordinates.

use crate::config::{ColorSpec, KeyBinding, clamp_opacity, clamp_stroke_width};
use crate::draw::StyleOverrides;
use crate::input::{InputState, Key, MouseButton, Tool};
use anyhow::{Context, Result, anyhow, bail};
use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Style changes as written in a script; colours use the config syntax.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleStep {
    #[serde(default)]
    pub stroke: Option<ColorSpec>,
    #[serde(default)]
    pub stroke_width: Option<f64>,
    #[serde(default)]
    pub fill: Option<ColorSpec>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub erasable: Option<bool>,
}

impl StyleStep {
    /// Converts to style overrides; widths and opacities are clamped like config values.
    pub fn to_overrides(&self) -> StyleOverrides {
        StyleOverrides {
            stroke: self.stroke.as_ref().map(ColorSpec::to_color),
            stroke_width: self.stroke_width.map(clamp_stroke_width),
            fill: self.fill.as_ref().map(ColorSpec::to_color),
            opacity: self.opacity.map(clamp_opacity),
            erasable: self.erasable,
        }
    }
}

/// One scripted input event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Tool(Tool),
    Style(StyleStep),
    Down([f64; 2]),
    Move([f64; 2]),
    Up([f64; 2]),
    /// Key chord such as "Ctrl+C" or "Escape"
    Key(String),
    /// Replaces the content of the selected text box
    Text(String),
    /// Sets the scale factors of the selected object
    Scale([f64; 2]),
    /// Absolute zoom level around the surface centre
    Zoom(f64),
}

/// Parses a script from JSON text.
pub fn parse_script(source: &str) -> Result<Vec<Step>> {
    serde_json::from_str(source).context("failed to parse gesture script")
}

/// Reads and parses a script file.
pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    parse_script(&source).with_context(|| format!("invalid script {}", path.display()))
}

/// Applies every step in order. Stops at the first step that cannot run.
pub fn run_script(state: &mut InputState, steps: &[Step]) -> Result<()> {
    for (index, step) in steps.iter().enumerate() {
        apply_step(state, step).with_context(|| format!("script step {}", index + 1))?;
    }
    debug!(
        "Script finished: {} steps, {} objects",
        steps.len(),
        state.canvas.len()
    );
    Ok(())
}

fn apply_step(state: &mut InputState, step: &Step) -> Result<()> {
    match step {
        Step::Tool(tool) => state.set_tool(*tool),
        Step::Style(style) => state.set_style(&style.to_overrides()),
        Step::Down([x, y]) => state.on_mouse_press(MouseButton::Left, *x, *y),
        Step::Move([x, y]) => state.on_mouse_motion(*x, *y),
        Step::Up([x, y]) => state.on_mouse_release(MouseButton::Left, *x, *y),
        Step::Key(chord) => press_chord(state, chord)?,
        Step::Text(text) => {
            if !state.set_active_text(text) {
                warn!("Text step ignored: no text box is selected");
            }
        }
        Step::Scale([sx, sy]) => {
            if !state.scale_active(*sx, *sy) {
                warn!("Scale step ignored: nothing is selected");
            }
        }
        Step::Zoom(zoom) => state.canvas.zoom_centered(*zoom),
    }
    Ok(())
}

/// Presses and releases a key chord, holding its modifiers around the key.
fn press_chord(state: &mut InputState, chord: &str) -> Result<()> {
    let binding = KeyBinding::parse(chord).map_err(|e| anyhow!(e))?;
    let key = Key::from_name(&binding.key);
    if key == Key::Unknown {
        bail!("unknown key '{}' in '{}'", binding.key, chord);
    }

    let modifiers: Vec<Key> = [
        (binding.ctrl, Key::Ctrl),
        (binding.shift, Key::Shift),
        (binding.alt, Key::Alt),
    ]
    .into_iter()
    .filter_map(|(held, key)| held.then_some(key))
    .collect();

    for modifier in &modifiers {
        state.on_key_press(*modifier);
    }
    state.on_key_press(key);
    state.on_key_release(key);
    for modifier in modifiers.iter().rev() {
        state.on_key_release(*modifier);
    }
    Ok(())
}
