//! Keybinding configuration types and parsing.
//!
//! This module defines the configurable keybinding system that allows users
//! to customize keyboard shortcuts for every board action.

use crate::input::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Selection editing
    DeleteSelection,
    NudgeLeft,
    NudgeRight,
    NudgeUp,
    NudgeDown,
    Copy,
    Paste,
    Deselect,

    // Viewport
    ZoomIn,
    ZoomOut,
    ResetZoom,

    // Canvas
    ClearCanvas,

    // Tool shortcuts
    SelectTool,
    PencilTool,
    EraserTool,
    RectangleTool,
    TriangleTool,
    CircleTool,
    EllipseTool,
    LineTool,
    ArrowTool,
    TextTool,
}

impl Action {
    /// Tool selected by a tool shortcut action.
    pub fn tool(self) -> Option<Tool> {
        let tool = match self {
            Action::SelectTool => Tool::Select,
            Action::PencilTool => Tool::FreeHand,
            Action::EraserTool => Tool::Erase,
            Action::RectangleTool => Tool::Rectangle,
            Action::TriangleTool => Tool::Triangle,
            Action::CircleTool => Tool::Circle,
            Action::EllipseTool => Tool::Ellipse,
            Action::LineTool => Tool::Line,
            Action::ArrowTool => Tool::Arrow,
            Action::TextTool => Tool::Text,
            _ => return None,
        };
        Some(tool)
    }
}

/// A single keybinding: a key name with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+Delete" or "Escape".
    /// Modifiers can appear in any order and spaces around '+' are allowed.
    /// A literal plus key is written as "Ctrl++".
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" leaves two empty parts behind; joined they form the '+' key.
        let key = key_parts.join("+");
        let key = if key.is_empty() { "+".to_string() } else { key };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings:
/// ```toml
/// [keybindings]
/// delete_selection = ["Backspace", "Delete"]
/// copy = ["Ctrl+C"]
/// rectangle_tool = ["R"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_delete_selection")]
    pub delete_selection: Vec<String>,

    #[serde(default = "default_nudge_left")]
    pub nudge_left: Vec<String>,

    #[serde(default = "default_nudge_right")]
    pub nudge_right: Vec<String>,

    #[serde(default = "default_nudge_up")]
    pub nudge_up: Vec<String>,

    #[serde(default = "default_nudge_down")]
    pub nudge_down: Vec<String>,

    #[serde(default = "default_copy")]
    pub copy: Vec<String>,

    #[serde(default = "default_paste")]
    pub paste: Vec<String>,

    #[serde(default = "default_deselect")]
    pub deselect: Vec<String>,

    #[serde(default = "default_zoom_in")]
    pub zoom_in: Vec<String>,

    #[serde(default = "default_zoom_out")]
    pub zoom_out: Vec<String>,

    #[serde(default = "default_reset_zoom")]
    pub reset_zoom: Vec<String>,

    #[serde(default = "default_clear_canvas")]
    pub clear_canvas: Vec<String>,

    #[serde(default = "default_select_tool")]
    pub select_tool: Vec<String>,

    #[serde(default = "default_pencil_tool")]
    pub pencil_tool: Vec<String>,

    #[serde(default = "default_eraser_tool")]
    pub eraser_tool: Vec<String>,

    #[serde(default = "default_rectangle_tool")]
    pub rectangle_tool: Vec<String>,

    #[serde(default = "default_triangle_tool")]
    pub triangle_tool: Vec<String>,

    #[serde(default = "default_circle_tool")]
    pub circle_tool: Vec<String>,

    #[serde(default = "default_ellipse_tool")]
    pub ellipse_tool: Vec<String>,

    #[serde(default = "default_line_tool")]
    pub line_tool: Vec<String>,

    #[serde(default = "default_arrow_tool")]
    pub arrow_tool: Vec<String>,

    #[serde(default = "default_text_tool")]
    pub text_tool: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            delete_selection: default_delete_selection(),
            nudge_left: default_nudge_left(),
            nudge_right: default_nudge_right(),
            nudge_up: default_nudge_up(),
            nudge_down: default_nudge_down(),
            copy: default_copy(),
            paste: default_paste(),
            deselect: default_deselect(),
            zoom_in: default_zoom_in(),
            zoom_out: default_zoom_out(),
            reset_zoom: default_reset_zoom(),
            clear_canvas: default_clear_canvas(),
            select_tool: default_select_tool(),
            pencil_tool: default_pencil_tool(),
            eraser_tool: default_eraser_tool(),
            rectangle_tool: default_rectangle_tool(),
            triangle_tool: default_triangle_tool(),
            circle_tool: default_circle_tool(),
            ellipse_tool: default_ellipse_tool(),
            line_tool: default_line_tool(),
            arrow_tool: default_arrow_tool(),
            text_tool: default_text_tool(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let entries: [(&Vec<String>, Action); 22] = [
            (&self.delete_selection, Action::DeleteSelection),
            (&self.nudge_left, Action::NudgeLeft),
            (&self.nudge_right, Action::NudgeRight),
            (&self.nudge_up, Action::NudgeUp),
            (&self.nudge_down, Action::NudgeDown),
            (&self.copy, Action::Copy),
            (&self.paste, Action::Paste),
            (&self.deselect, Action::Deselect),
            (&self.zoom_in, Action::ZoomIn),
            (&self.zoom_out, Action::ZoomOut),
            (&self.reset_zoom, Action::ResetZoom),
            (&self.clear_canvas, Action::ClearCanvas),
            (&self.select_tool, Action::SelectTool),
            (&self.pencil_tool, Action::PencilTool),
            (&self.eraser_tool, Action::EraserTool),
            (&self.rectangle_tool, Action::RectangleTool),
            (&self.triangle_tool, Action::TriangleTool),
            (&self.circle_tool, Action::CircleTool),
            (&self.ellipse_tool, Action::EllipseTool),
            (&self.line_tool, Action::LineTool),
            (&self.arrow_tool, Action::ArrowTool),
            (&self.text_tool, Action::TextTool),
        ];

        for (bindings, action) in entries {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing_action, action
                    ));
                }
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn bindings(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|key| key.to_string()).collect()
}

fn default_delete_selection() -> Vec<String> {
    bindings(&["Backspace", "Delete"])
}

fn default_nudge_left() -> Vec<String> {
    bindings(&["Left"])
}

fn default_nudge_right() -> Vec<String> {
    bindings(&["Right"])
}

fn default_nudge_up() -> Vec<String> {
    bindings(&["Up"])
}

fn default_nudge_down() -> Vec<String> {
    bindings(&["Down"])
}

fn default_copy() -> Vec<String> {
    bindings(&["Ctrl+C"])
}

fn default_paste() -> Vec<String> {
    bindings(&["Ctrl+V"])
}

fn default_deselect() -> Vec<String> {
    bindings(&["Escape"])
}

fn default_zoom_in() -> Vec<String> {
    bindings(&["Ctrl+=", "Ctrl++"])
}

fn default_zoom_out() -> Vec<String> {
    bindings(&["Ctrl+-"])
}

fn default_reset_zoom() -> Vec<String> {
    bindings(&["Ctrl+0"])
}

fn default_clear_canvas() -> Vec<String> {
    bindings(&["Ctrl+Shift+Delete"])
}

fn default_select_tool() -> Vec<String> {
    bindings(&["V"])
}

fn default_pencil_tool() -> Vec<String> {
    bindings(&["P"])
}

fn default_eraser_tool() -> Vec<String> {
    bindings(&["E"])
}

fn default_rectangle_tool() -> Vec<String> {
    bindings(&["R"])
}

fn default_triangle_tool() -> Vec<String> {
    bindings(&["Shift+T"])
}

fn default_circle_tool() -> Vec<String> {
    bindings(&["C"])
}

fn default_ellipse_tool() -> Vec<String> {
    bindings(&["O"])
}

fn default_line_tool() -> Vec<String> {
    bindings(&["L"])
}

fn default_arrow_tool() -> Vec<String> {
    bindings(&["A"])
}

fn default_text_tool() -> Vec<String> {
    bindings(&["T"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let binding = KeyBinding::parse("Escape").unwrap();
        assert_eq!(binding.key, "Escape");
        assert!(!binding.ctrl);
        assert!(!binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_ctrl_shift_key() {
        let binding = KeyBinding::parse("Ctrl+Shift+Delete").unwrap();
        assert_eq!(binding.key, "Delete");
        assert!(binding.ctrl);
        assert!(binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_plus_key() {
        let binding = KeyBinding::parse("Ctrl++").unwrap();
        assert_eq!(binding.key, "+");
        assert!(binding.ctrl);
    }

    #[test]
    fn test_parse_with_spaces_and_order() {
        let a = KeyBinding::parse("Ctrl + Shift + W").unwrap();
        let b = KeyBinding::parse("Shift+Ctrl+W").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_rejects_modifiers_only() {
        assert!(KeyBinding::parse("Ctrl+Shift").is_err());
        assert!(KeyBinding::parse("   ").is_err());
    }

    #[test]
    fn test_matches() {
        let binding = KeyBinding::parse("Ctrl+C").unwrap();
        assert!(binding.matches("c", true, false, false));
        assert!(!binding.matches("C", false, false, false));
        assert!(!binding.matches("C", true, true, false));
    }

    #[test]
    fn test_build_action_map() {
        let map = KeybindingsConfig::default().build_action_map().unwrap();

        let backspace = KeyBinding::parse("Backspace").unwrap();
        assert_eq!(map.get(&backspace), Some(&Action::DeleteSelection));

        let triangle = KeyBinding::parse("Shift+T").unwrap();
        assert_eq!(map.get(&triangle), Some(&Action::TriangleTool));

        let text = KeyBinding::parse("T").unwrap();
        assert_eq!(map.get(&text), Some(&Action::TextTool));
    }

    #[test]
    fn test_duplicate_keybinding_detection() {
        let mut config = KeybindingsConfig::default();
        config.copy = vec!["Ctrl+Z".to_string()];
        config.paste = vec!["Ctrl+Z".to_string()];

        let err_msg = config.build_action_map().unwrap_err();
        assert!(err_msg.contains("Duplicate keybinding"));
        assert!(err_msg.contains("Ctrl+Z"));
    }

    #[test]
    fn tool_actions_map_to_tools() {
        assert_eq!(Action::PencilTool.tool(), Some(Tool::FreeHand));
        assert_eq!(Action::TriangleTool.tool(), Some(Tool::Triangle));
        assert_eq!(Action::Copy.tool(), None);
    }
}
