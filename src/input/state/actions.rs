use crate::canvas::HostCanvas;
use crate::config::Action;
use crate::input::events::Key;
use log::{debug, trace};

use super::InputState;

/// Offset applied to a copied object so the pasted clone does not cover it.
const PASTE_OFFSET: f64 = 20.0;

/// Distance moved by one nudge.
const NUDGE_STEP: f64 = 1.0;

impl InputState {
    /// Processes a key press event.
    ///
    /// Modifier keys only update [`InputState::modifiers`]. While a text box is
    /// being edited, plain keys edit its content and only Deselect (Escape by
    /// default) is looked up as an action. Otherwise the key is matched against
    /// the keybinding map.
    pub fn on_key_press(&mut self, key: Key) {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return;
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return;
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return;
            }
            _ => {}
        }

        let action = key.binding_name().and_then(|name| self.find_action(&name));

        if self.canvas.is_editing_text() {
            if action == Some(Action::Deselect) {
                self.handle_action(Action::Deselect);
            } else {
                self.edit_active_text(key);
            }
            return;
        }

        match action {
            Some(action) => self.handle_action(action),
            None => trace!("No action bound to {key:?}"),
        }
    }

    /// Processes a key release event.
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            _ => {}
        }
    }

    /// Applies a typed key to the text box being edited.
    fn edit_active_text(&mut self, key: Key) {
        let Some(id) = self.canvas.active_object() else {
            return;
        };
        let Some(mut content) = self
            .canvas
            .get(id)
            .and_then(|shape| shape.text_content())
            .map(str::to_string)
        else {
            return;
        };

        match key {
            Key::Char(c) if !(self.modifiers.ctrl || self.modifiers.alt) => content.push(c),
            Key::Space => content.push(' '),
            Key::Tab => content.push('\t'),
            Key::Return => content.push('\n'),
            Key::Backspace => {
                content.pop();
            }
            _ => return,
        }
        self.canvas.set_text(id, &content);
    }

    /// Executes a keybinding action.
    pub fn handle_action(&mut self, action: Action) {
        debug!("Action: {action:?}");
        match action {
            Action::DeleteSelection => {
                if let Some(id) = self.canvas.active_object() {
                    self.canvas.remove(id);
                }
                self.canvas.request_render();
                self.canvas.discard_active_object();
            }
            Action::NudgeLeft => self.nudge(-NUDGE_STEP, 0.0),
            Action::NudgeRight => self.nudge(NUDGE_STEP, 0.0),
            Action::NudgeUp => self.nudge(0.0, -NUDGE_STEP),
            Action::NudgeDown => self.nudge(0.0, NUDGE_STEP),
            Action::Copy => {
                let Some(id) = self.canvas.active_object() else {
                    return;
                };
                let Some(mut clone) = self.canvas.get(id).cloned() else {
                    return;
                };
                clone.exit_editing();
                clone.translate(PASTE_OFFSET, PASTE_OFFSET);
                self.clipboard = Some(clone);
                self.canvas.discard_active_object();
                let cursor = self.tool_cursor();
                self.canvas.set_cursor(cursor);
            }
            Action::Paste => {
                let Some(clone) = self.clipboard.clone() else {
                    return;
                };
                let id = self.canvas.add(clone);
                self.canvas.set_active_object(Some(id));
                self.canvas.request_render();
            }
            Action::Deselect => {
                self.canvas.discard_active_object();
                let cursor = self.tool_cursor();
                self.canvas.set_cursor(cursor);
                self.canvas.request_render();
            }
            Action::ZoomIn => {
                let zoom = self.canvas.zoom() * self.zoom_step;
                self.canvas.zoom_centered(zoom);
            }
            Action::ZoomOut => {
                let zoom = self.canvas.zoom() / self.zoom_step;
                self.canvas.zoom_centered(zoom);
            }
            Action::ResetZoom => self.canvas.reset_viewport(),
            Action::ClearCanvas => {
                self.builder.abort(&mut self.canvas);
                self.canvas.end_transform();
                self.canvas.clear();
                let cursor = self.tool_cursor();
                self.canvas.set_cursor(cursor);
            }
            _ => {
                if let Some(tool) = action.tool() {
                    self.set_tool(tool);
                }
            }
        }
    }

    fn nudge(&mut self, dx: f64, dy: f64) {
        if let Some(id) = self.canvas.active_object() {
            self.canvas.translate_object(id, dx, dy);
        }
    }
}
